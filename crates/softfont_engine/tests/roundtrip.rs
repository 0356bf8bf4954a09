//! Envelope parsing and byte-exact round trips.

use pretty_assertions::assert_eq;
use softfont_engine::SoftFont;

const SIMPLE_FONT: &[u8] = b"\x1BP1;1;0;10;0;2;16;0{ @\n????????/????????;@A@A@A@A/~~~~~~~~\n\x1B\\";

fn parsed(contents: &[u8]) -> SoftFont {
    let mut font = SoftFont::new();
    assert!(font.parse(contents), "expected a successful parse");
    font
}

#[test]
fn parse_then_serialize_is_identity() {
    let font = parsed(SIMPLE_FONT);
    assert_eq!(font.serialize(), SIMPLE_FONT);
}

#[test]
fn surrounding_bytes_are_preserved() {
    let mut contents = b"#!/bin/sh\nprintf '".to_vec();
    contents.extend_from_slice(SIMPLE_FONT);
    contents.extend_from_slice(b"'\n");
    let font = parsed(&contents);
    assert_eq!(font.serialize(), contents);
}

#[test]
fn eight_bit_envelope_round_trips() {
    let contents = b"\x901;0;0;6;2;2;10{A??;F^\x9C";
    let font = parsed(contents);
    assert_eq!(font.c1_controls(), Some(true));
    assert_eq!(font.serialize(), contents);
}

#[test]
fn seven_bit_envelope_is_detected() {
    let font = parsed(SIMPLE_FONT);
    assert_eq!(font.c1_controls(), Some(false));
}

#[test]
fn parse_reads_the_envelope_fields() {
    let font = parsed(SIMPLE_FONT);
    assert_eq!(font.id(), " @");
    assert_eq!(font.params().pcn(), Some(1));
    assert_eq!(font.first_index(), 1);
    assert_eq!(font.charset_size(), 94);
    assert_eq!(font.glyph_count(), 2);
    assert!(!font.glyph_is_used(1));
    assert!(font.glyph_is_used(2));
}

#[test]
fn failed_parse_leaves_the_document_unchanged() {
    let mut font = parsed(SIMPLE_FONT);
    let before = font.clone();
    assert!(!font.parse(b"not a font at all"));
    assert!(!font.parse(b"\x1BP1;1{ @missing terminator"));
    assert!(!font.parse(b"\x1BPno braces\x1B\\"));
    assert_eq!(font, before);
}

#[test]
fn huge_parameter_values_parse_without_wrapping() {
    let contents = b"\x1BP99999999999{ @??\x1B\\";
    let font = parsed(contents);
    // The capped value stays positive and the raw text is untouched.
    assert!(font.params().pfn().unwrap() > 0);
    assert_eq!(font.serialize(), contents);
}

#[test]
fn glyph_section_must_not_be_empty() {
    let mut font = SoftFont::new();
    assert!(!font.parse(b"\x1BP1;1{ @\x1B\\"));
}

#[test]
fn edits_keep_glyph_formatting() {
    let mut font = parsed(SIMPLE_FONT);
    let mut pixels = font.get_pixels(1);
    pixels[0] = 1;
    font.set_pixels(1, &pixels);
    let serialized = font.serialize();
    // The newline framing around the glyph bodies survives the rewrite.
    let text = String::from_utf8_lossy(&serialized);
    assert!(text.contains("{ @\n"));
    assert!(text.contains("\n\x1B\\"));
    assert!(font.parse(&serialized));
    assert_eq!(font.get_pixels(1), pixels);
}

#[test]
fn writing_below_first_index_extends_the_front() {
    let mut font = parsed(SIMPLE_FONT);
    assert_eq!(font.first_index(), 1);
    let mut pixels = font.get_pixels(0);
    pixels[0] = 1;
    // Out-of-range reads are blank.
    assert!(pixels.iter().skip(1).all(|&p| p == 0));
    font.set_pixels(0, &pixels);
    assert_eq!(font.first_index(), 0);
    assert_eq!(font.params().pcn(), Some(0));
    assert_eq!(font.glyph_count(), 3);
    assert_eq!(font.get_pixels(0), pixels);
}

#[test]
fn writing_past_the_end_extends_the_back() {
    let mut font = parsed(SIMPLE_FONT);
    let mut pixels = font.get_pixels(10);
    pixels[3] = 1;
    font.set_pixels(10, &pixels);
    assert_eq!(font.glyph_count(), 10);
    assert_eq!(font.get_pixels(10), pixels);
    assert!(font.glyph_is_used(10));
}

#[test]
fn clear_resets_to_defaults() {
    let mut font = parsed(SIMPLE_FONT);
    font.clear();
    assert_eq!(font.id(), " @");
    assert_eq!(font.params().as_str(), "0;0;0;10;0;2;16;0");
    assert_eq!(font.glyph_count(), 0);
    assert_eq!(font.c1_controls(), Some(false));
    assert_eq!((font.cell_width(), font.cell_height()), (10, 16));
}

#[test]
fn switching_control_forms_rewrites_the_envelope() {
    let mut font = parsed(SIMPLE_FONT);
    font.set_c1_controls(true);
    let serialized = font.serialize();
    assert_eq!(serialized[0], 0x90);
    assert_eq!(*serialized.last().unwrap(), 0x9C);
}

#[test]
fn file_load_and_save() {
    let path = std::env::temp_dir().join("softfont_engine_roundtrip_test.fnt");
    std::fs::write(&path, SIMPLE_FONT).unwrap();
    let mut font = SoftFont::new();
    font.load(&path).unwrap();
    let out = std::env::temp_dir().join("softfont_engine_roundtrip_test_out.fnt");
    font.save(&out).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), SIMPLE_FONT);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&out);
}

#[test]
fn load_rejects_files_without_a_definition() {
    let path = std::env::temp_dir().join("softfont_engine_not_a_font.txt");
    std::fs::write(&path, b"just some text").unwrap();
    let mut font = SoftFont::new();
    assert!(font.load(&path).is_err());
    let _ = std::fs::remove_file(&path);
}
