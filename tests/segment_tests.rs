// File: tests/segment_tests.rs
use gridcal::config::Layout;
use gridcal::model::{Fragment, SegmentError, Segmenter};

fn frag(text: &str, x: i32, y: i32) -> Fragment {
    Fragment {
        text: text.to_string(),
        x,
        y,
    }
}

fn segmenter() -> Segmenter {
    Segmenter::new(Layout::default())
}

#[test]
fn header_concatenates_same_row_fragments() {
    let fragments = vec![
        frag("ИУ5", 50, 10),
        frag("-61", 80, 10),
        frag("Математика.", 50, 100),
    ];
    let (meta, consumed) = segmenter().decode_meta(&fragments).unwrap();
    assert_eq!(meta.group, "ИУ5-61");
    assert_eq!(consumed, 2);
}

#[test]
fn boundary_fragments_after_header_are_skipped() {
    let fragments = vec![
        frag("ИУ5", 50, 10),
        frag("-61", 80, 10),
        frag("Б", 10, 600),          // left of the content margin and below the page
        frag("стр. 1", 100, 600),    // below the bottom margin only
        frag("Математика.", 50, 100),
    ];
    let (meta, consumed) = segmenter().decode_meta(&fragments).unwrap();
    assert_eq!(meta.group, "ИУ5-61");
    assert_eq!(consumed, 4, "both boundary fragments must be consumed");
}

#[test]
fn page_with_one_fragment_is_malformed() {
    let fragments = vec![frag("ИУ5", 50, 10)];
    assert!(matches!(
        segmenter().decode_meta(&fragments),
        Err(SegmentError::MalformedDocument(_))
    ));
}

#[test]
fn header_spanning_whole_page_is_malformed() {
    let fragments = vec![frag("ИУ5", 50, 10), frag("-61", 80, 10), frag("Б", 120, 10)];
    assert!(matches!(
        segmenter().decode_meta(&fragments),
        Err(SegmentError::MalformedDocument(_))
    ));
}

#[test]
fn unit_joins_rows_with_spaces_and_same_row_directly() {
    let fragments = vec![
        frag("Мате", 46, 100),
        frag("матика.", 90, 100), // same row: no separator
        frag("Лекция.", 46, 90),  // next row: single space
        frag("]", 46, 80),
    ];
    let units = segmenter().decode_units(&fragments);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].data, "Математика. Лекция. ]");
}

#[test]
fn unit_bounding_box_tracks_first_sentinel_and_rightmost() {
    let fragments = vec![
        frag("Математика.", 46, 100),
        frag("аудитория 201", 240, 95), // rightmost fragment sits mid-cell
        frag("Лекция.", 46, 90),
        frag("]", 50, 80),
    ];
    let units = segmenter().decode_units(&fragments);
    assert_eq!(units[0].left, 46);
    assert_eq!(units[0].top, 100);
    assert_eq!(units[0].right, 240, "right edge must be the max x seen, not the last");
    assert_eq!(units[0].bottom, 80);
}

#[test]
fn sentinel_splits_consecutive_units() {
    let fragments = vec![
        frag("Первая.", 46, 100),
        frag("]", 46, 90),
        frag("Вторая.", 233, 100),
        frag("]", 233, 90),
    ];
    let units = segmenter().decode_units(&fragments);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].data, "Первая. ]");
    assert_eq!(units[1].data, "Вторая. ]");
    assert_eq!(units[1].left, 233);
}

#[test]
fn bare_sentinel_forms_an_empty_cell() {
    let fragments = vec![frag("]", 46, 100), frag("Вторая.", 233, 100), frag("]", 233, 90)];
    let units = segmenter().decode_units(&fragments);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].data, "]");
    assert_eq!(units[0].left, units[0].right);
}

#[test]
fn trailing_cell_without_sentinel_is_still_consumed() {
    let fragments = vec![frag("Первая.", 46, 100), frag("]", 46, 90), frag("обрыв", 233, 100)];
    let units = segmenter().decode_units(&fragments);
    assert_eq!(units.len(), 2);
    assert_eq!(units[1].data, "обрыв");
}

#[test]
fn decode_accounts_for_every_fragment() {
    let fragments = vec![
        frag("ИУ5", 50, 10),
        frag("-61", 80, 10),
        frag("Б", 10, 600),
        frag("Математика.", 46, 100),
        frag("Лекция.", 46, 90),
        frag("]", 46, 80),
        frag("Физика.", 233, 100),
        frag("]", 233, 90),
    ];
    let (meta, units) = segmenter().decode(&fragments).unwrap();
    assert_eq!(meta.group, "ИУ5-61");
    // No gaps, no overlaps: everything after the header lands in some cell.
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].data, "Математика. Лекция. ]");
    assert_eq!(units[1].data, "Физика. ]");
}
