//! End-to-end: convert an image, load it into a session, edit, undo, redo.

use pixstudio::{
    parse_script, Colour, EditorSession, Palette, PipelineOptions, QuantizationStrategy, Raster,
    Stylizer, StudioError,
};

fn two_tone(width: usize, height: usize) -> Raster {
    let mut colours = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            colours.push(if x < width / 2 {
                Colour::rgb(250, 70, 60)
            } else {
                Colour::rgb(20, 20, 70)
            });
        }
    }
    Raster::from_colours(width, height, &colours).unwrap()
}

#[test]
fn convert_then_edit_with_history() {
    let palette = Palette::default_palette();
    let stylizer = Stylizer::new(
        &palette,
        PipelineOptions::plain(QuantizationStrategy::BlockAverage),
    )
    .unwrap();
    let converted = stylizer.stylize(&two_tone(64, 48), 16).unwrap();
    assert_eq!(converted.size(), (16, 16));
    assert!(converted.pixels().all(|c| palette.contains(c)));

    let red = Colour::rgb(0xff, 0x3e, 0x3e);
    let navy = Colour::rgb(0x1a, 0x1b, 0x4b);
    assert_eq!(converted.get(0, 0), Some(red));
    assert_eq!(converted.get(15, 15), Some(navy));

    let mut session = EditorSession::new(16, true).unwrap();
    assert!(session.load_raster(&converted).unwrap());
    let loaded = session.snapshot();

    // Fill the navy half gold, then paint one cell
    let gold = Colour::rgb(0xff, 0xd7, 0x00);
    assert!(session.fill(15, 0, gold));
    assert!(session.draw(0, 0, Colour::WHITE).unwrap());
    assert_eq!(session.grid().get(12, 9), Some(gold));
    let edited = session.snapshot();

    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(session.snapshot(), loaded);

    session.redo().unwrap();
    session.redo().unwrap();
    assert_eq!(session.snapshot(), edited);
    assert!(matches!(session.redo(), Err(StudioError::NothingToRedo)));
}

#[test]
fn scripted_edits_match_direct_calls() {
    let script = parse_script(
        "# checker corner\n\
         colour #ff3e3e\n\
         draw 0 0\n\
         draw 1 1\n\
         tool fill\n\
         click 4 4 # everything else\n\
         fill 0 0 #ffffff\n",
    )
    .unwrap();

    let mut scripted = EditorSession::new(16, true).unwrap();
    for line in &script {
        line.command.apply(&mut scripted).unwrap();
    }

    let red = Colour::rgb(0xff, 0x3e, 0x3e);
    let mut direct = EditorSession::new(16, true).unwrap();
    direct.draw(0, 0, red).unwrap();
    direct.draw(1, 1, red).unwrap();
    direct.fill(4, 4, red);
    direct.fill(0, 0, Colour::WHITE);

    assert_eq!(scripted.snapshot(), direct.snapshot());
    assert_eq!(scripted.history().len(), direct.history().len());
}
