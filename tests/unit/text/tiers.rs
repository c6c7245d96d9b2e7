use super::*;

#[test]
fn tables_are_sorted_and_end_at_zero() {
    for table in [VERSE_TIERS, NARRATIVE_TIERS] {
        assert!(
            table
                .windows(2)
                .all(|w| w[0].min_exclusive_len > w[1].min_exclusive_len)
        );
        assert_eq!(table.last().map(|t| t.min_exclusive_len), Some(0));
        // Longer text never gets a bigger font.
        assert!(table.windows(2).all(|w| w[0].size <= w[1].size));
    }
}

#[test]
fn verse_boundaries_are_exclusive() {
    assert_eq!(select_tier(VERSE_TIERS, 301).size, 17);
    assert_eq!(select_tier(VERSE_TIERS, 300).size, 19);
    assert_eq!(select_tier(VERSE_TIERS, 101).size, 21);
    assert_eq!(select_tier(VERSE_TIERS, 100).size, 22);
    assert_eq!(select_tier(VERSE_TIERS, 0).line_height, 30);
}

#[test]
fn narrative_long_text_hits_smallest_tier() {
    let t = select_tier(NARRATIVE_TIERS, 1300);
    assert_eq!((t.size, t.line_height), (14, 19));
    assert_eq!(select_tier(NARRATIVE_TIERS, 1200).size, 15);
    assert_eq!(select_tier(NARRATIVE_TIERS, 50).size, 20);
}
