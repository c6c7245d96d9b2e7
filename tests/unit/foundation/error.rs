use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CardError::draw("x").to_string().contains("draw error:"));
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        CardError::asset_load("bg.png", "missing")
            .to_string()
            .contains("asset load error for 'bg.png': missing")
    );
}

#[test]
fn out_of_range_names_category_and_bounds() {
    let err = CardError::OutOfRange {
        category: "jour".to_string(),
        index: 5,
        len: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("jour"));
    assert!(msg.contains('5'));
    assert!(msg.contains('3'));
}

#[test]
fn asset_load_is_classified_as_recoverable() {
    assert!(CardError::asset_load("logo.png", "boom").is_asset_load());
    assert!(!CardError::draw("boom").is_asset_load());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
