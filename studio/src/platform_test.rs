use super::*;

#[test]
fn fixed_dimensions_per_platform() {
    let cases = [
        (Platform::Instagram, Size::new(600, 600)),
        (Platform::Facebook, Size::new(600, 315)),
        (Platform::Twitter, Size::new(600, 335)),
        (Platform::Linkedin, Size::new(600, 315)),
    ];
    for (platform, expected) in cases {
        assert_eq!(dimensions_for(platform), expected, "{platform}");
    }
}

#[test]
fn unknown_platform_name_falls_back_to_instagram() {
    assert_eq!(dimensions_for(Platform::parse("myspace")), dimensions_for(Platform::Instagram));
    assert_eq!(dimensions_for(Platform::parse("")), Size::new(600, 600));
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(Platform::parse(" LinkedIn "), Platform::Linkedin);
    assert_eq!(Platform::parse("Twitter"), Platform::Twitter);
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Platform::Facebook).unwrap(), "\"facebook\"");
    let p: Platform = serde_json::from_str("\"twitter\"").unwrap();
    assert_eq!(p, Platform::Twitter);
}

#[test]
fn deserialize_unknown_falls_back() {
    let p: Platform = serde_json::from_str("\"tiktok\"").unwrap();
    assert_eq!(p, Platform::Instagram);
}

#[test]
fn display_matches_identifier() {
    for p in Platform::ALL {
        assert_eq!(p.to_string(), p.as_str());
        assert_eq!(Platform::parse(p.as_str()), p);
    }
}
