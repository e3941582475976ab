use super::*;

#[test]
fn parse_hex_accepts_rgb_and_rgba() {
    assert_eq!(Color::parse_hex("#ff3366").unwrap(), Color::rgba(255, 51, 102, 255));
    assert_eq!(Color::parse_hex("FF336680").unwrap(), Color::rgba(255, 51, 102, 128));
    assert!(Color::parse_hex("#fff").is_err());
    assert!(Color::parse_hex("#gg0000").is_err());
}

#[test]
fn argb_packing_matches_host_layout() {
    let c = Color::from_argb(0x80_11_22_33);
    assert_eq!(c, Color::rgba(0x11, 0x22, 0x33, 0x80));
    assert_eq!(c.to_argb(), 0x80_11_22_33);
    assert_eq!(Color::from_argb(0xFF00_0000), Color::BLACK);
}

#[test]
fn serde_accepts_hex_object_and_array() {
    let c: Color = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(c, Color::BLACK);

    let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 255));

    let c: Color = serde_json::from_str("[1,2,3,4]").unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));

    assert!(serde_json::from_str::<Color>("[1,2]").is_err());
    assert_eq!(serde_json::to_string(&Color::WHITE).unwrap(), "\"#ffffff\"");
}

#[test]
fn premul_of_opaque_is_identity() {
    assert_eq!(Color::rgba(10, 20, 30, 255).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Color::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}
