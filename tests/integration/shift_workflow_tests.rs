/*!
 * Integration tests for the shift workflow
 */

use anyhow::Result;
use std::fs;
use srtshift::app_config::Config;
use srtshift::app_controller::Controller;
use srtshift::subtitle_processor::parse_blocks;
use srtshift::time_codec::TimeCode;
use crate::common;

const MIXED_SRT: &str = "1
00:00:52,119 --> 00:00:56,658
<i>Lorum ipsum dolor sit amet,
consectetur adipiscing elit,</i>

not a caption at all

2
00:00:59,794 --> 00:01:03,430
Ut enim ad minim veniam, quis

3
00:01:04,566 -> 00:01:05,667
Broken arrow

4
00:59:58,500 --> 01:00:01,000
Across the hour
";

/// Test loading config, shifting a file and reading the result back
#[test]
fn test_shift_workflow_withMixedFile_shouldShiftValidCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("srtshift.json");
    let input = common::create_test_file(temp_dir.path(), "movie.srt", MIXED_SRT)?;
    let output = temp_dir.path().join("shifted").join("movie.srt");

    let config = Config::load_or_create(&config_path);
    let controller = Controller::with_config(config)?;
    let report = controller.run(&input, &output, 2.0)?;

    assert_eq!(report.blocks_written, 3);
    assert_eq!(report.segments_skipped, 2);

    let blocks = parse_blocks(&fs::read_to_string(&output)?);
    let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "4"]);

    assert_eq!(blocks[0].start, TimeCode::new(0, 0, 54, 119));
    assert_eq!(blocks[0].end, TimeCode::new(0, 0, 58, 658));
    assert_eq!(blocks[0].body, "<i>Lorum ipsum dolor sit amet,\nconsectetur adipiscing elit,</i>");
    assert_eq!(blocks[1].start, TimeCode::new(0, 1, 1, 794));
    assert_eq!(blocks[2].start, TimeCode::new(1, 0, 0, 500));
    assert_eq!(blocks[2].end, TimeCode::new(1, 0, 3, 0));

    Ok(())
}

/// Test that shifting forward and back restores the well-formed captions
#[test]
fn test_shift_workflow_forwardThenBack_shouldRestoreCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", MIXED_SRT)?;
    let forward = temp_dir.path().join("forward.srt");
    let back = temp_dir.path().join("back.srt");

    let controller = Controller::with_config(Config::default())?;
    controller.run(&input, &forward, 30.0)?;
    controller.run(&forward, &back, -30.0)?;

    assert_eq!(
        parse_blocks(&fs::read_to_string(&back)?),
        parse_blocks(MIXED_SRT)
    );
    Ok(())
}
