use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_classdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn sources_glob() -> String {
    fixture_path("doc_classes/*.xml")
}

/// Run the tool over the fixture classes and return the output directory.
fn generate() -> TempDir {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(sources_glob())
        .arg(dir.path())
        .assert()
        .success();
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

// -- pages --

#[test]
fn page_matches_expected() {
    let dir = generate();
    let expected = fs::read_to_string(fixture_path("BlipKitWaveform.expected.md")).unwrap();
    assert_eq!(read(&dir, "BlipKitWaveform.md"), expected);
}

#[test]
fn page_header_and_description() {
    let dir = generate();
    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.starts_with(
        "# Class: BlipKitTrack\n\nInherits: *RefCounted*\n\n**Generates a single waveform.**\n\n## Description\n\n"
    ));
    assert!(output.contains("[`BlipKitWaveform`](BlipKitWaveform.md)"));
    assert!(output.contains(
        "[`AudioStreamBlipKit`](https://docs.godotengine.org/en/stable/classes/class_audiostreamblipkit.html)"
    ));
    assert!(output.contains(
        "```gdscript\nvar track := BlipKitTrack.new()\nif track:\n    track.note = BlipKitTrack.NOTE_C_4\n```\n"
    ));
}

#[test]
fn page_index_sections() {
    let dir = generate();
    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.contains(
        "## Online Tutorials\n\n- [Examples](https://github.com/detomon/godot-blipkit/tree/master/examples)\n\n"
    ));
    assert!(output.contains(
        "## Properties\n\n- *BlipKitWaveform* [**`waveform`**](#blipkitwaveform-waveform)\n- *float* [**`volume`**](#float-volume)\n\n"
    ));
    assert!(output.contains(
        "- *void* [**`set_effect`**](#void-set_effecteffect-int-ticks-int--0)(effect: int, ticks: int = 0)\n"
    ));
    assert!(output.contains("- *int* [**`get_tick`**](#int-get_tick-const)() const\n"));
}

#[test]
fn page_enumerations_and_constants() {
    let dir = generate();
    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.contains(
        "## Enumerations\n\n### enum `Waveform`\n\n- `WAVEFORM_SQUARE` = `0`\n\t- Square wave.\n- `WAVEFORM_TRIANGLE` = `1`\n\t- Triangle wave.\n\n### enum `Effect`\n\n"
    ));
    assert!(output.contains("## Constants\n\n- `NOTE_C_4` = `48`\n\t- Middle C.\n\n"));
}

#[test]
fn page_cross_references() {
    let dir = generate();
    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.contains("Set [`waveform`](#blipkitwaveform-waveform) or call [`reset()`](#void-reset)"));
    assert!(output.contains("Defaults to [`WAVEFORM_SQUARE`](#waveform_square)."));
    assert!(output.contains("See [`set_effect()`](#void-set_effecteffect-int-ticks-int--0)."));
    assert!(output.contains("Enables an [`Effect`](#enum-effect) for `ticks` ticks."));
    assert!(output.contains("Returns the current tick as an `int`."));
}

#[test]
fn page_property_descriptions() {
    let dir = generate();
    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.contains(
        "### `float volume`\n\n*Default*: `0.5`\n\n*Setter*: `set_volume`\n\n*Getter*: `get_volume`\n\n"
    ));
}

// -- index --

#[test]
fn readme_lists_classes_sorted() {
    let dir = generate();
    assert_eq!(
        read(&dir, "README.md"),
        "# Classes\n\n- [`BlipKitTrack`](BlipKitTrack.md)\n- [`BlipKitWaveform`](BlipKitWaveform.md)\n"
    );
}

// -- target directory --

#[test]
fn stale_markdown_deleted() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stale.md"), "# Old\n").unwrap();
    fs::write(dir.path().join("keep.txt"), "not markdown").unwrap();

    cmd()
        .arg(sources_glob())
        .arg(dir.path())
        .assert()
        .success();

    assert!(!dir.path().join("stale.md").exists());
    assert!(dir.path().join("keep.txt").exists());
    assert!(dir.path().join("BlipKitTrack.md").exists());
}

#[test]
fn single_class_links_others_externally() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(fixture_path("doc_classes/BlipKitTrack.xml"))
        .arg(dir.path())
        .assert()
        .success();

    let output = read(&dir, "BlipKitTrack.md");
    assert!(output.contains(
        "[`BlipKitWaveform`](https://docs.godotengine.org/en/stable/classes/class_blipkitwaveform.html)"
    ));
    assert!(!dir.path().join("BlipKitWaveform.md").exists());
}

// -- errors --

#[test]
fn malformed_xml_fails() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(src.path().join("Broken.xml"), "<class name=\"Broken\"><description>").unwrap();

    cmd()
        .arg(format!("{}/*.xml", src.path().display()))
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn missing_arguments_fail() {
    cmd()
        .arg(sources_glob())
        .assert()
        .failure()
        .stderr(predicate::str::contains("<TARGET>"));
}

#[test]
fn invalid_glob_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("[")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob pattern"));
}
