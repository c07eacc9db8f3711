use postmark_inbound::*;

#[test]
fn test_parse_rfc2822_date() {
    let date = Timestamp::parse("Wed, 6 Sep 2017 19:11:00 +0200");
    assert!(!date.is_fallback());
    assert_eq!(
        date.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        "2017-09-06 19:11:00 +0200"
    );
}

#[test]
fn test_parse_drops_trailing_comment() {
    let date = Timestamp::parse("Fri, 27 Apr 2018 19:00:00 +0200 (CEST)");
    assert_eq!(
        date.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2018-04-27 19:00:00"
    );
    assert_eq!(date.timezone_name(), "+02:00");
}

#[test]
fn test_parse_drops_malformed_trailing_comment() {
    let date = Timestamp::parse("Fri, 27 Apr 2018 19:00:00 +0100 (West-Europe (stand");
    assert!(!date.is_fallback());
    assert_eq!(
        date.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2018-04-27 19:00:00"
    );
    assert_eq!(date.timezone_name(), "+01:00");
}

#[test]
fn test_normalize_strips_weekday_anywhere() {
    assert_eq!(
        Timestamp::normalize("Wed, 6 Sep 2017 19:11:00 +0200"),
        "6 Sep 2017 19:11:00 +0200"
    );
    assert_eq!(
        Timestamp::normalize("6 Sep 2017 wed 19:11:00 +0200 (CEST)"),
        "6 Sep 2017 19:11:00 +0200"
    );
    assert_eq!(Timestamp::normalize("SAT, 1 Jan 2000"), "1 Jan 2000");
}

#[test]
fn test_parse_double_spaced_day() {
    let date = Timestamp::parse("Wed,  6 Sep 2017 19:11:00 +0200");
    assert!(!date.is_fallback());
    assert_eq!(
        date.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        "2017-09-06 19:11:00 +0200"
    );
    assert_eq!(
        Timestamp::normalize("Fri,  27  Apr 2018 19:00:00 +0200 (CEST)"),
        "27 Apr 2018 19:00:00 +0200"
    );
}

#[test]
fn test_parse_without_weekday() {
    let date = Timestamp::parse("1 Jan 2025 12:00:00 +0000");
    assert!(date.is_utc());
    assert_eq!(date.timezone_name(), "+00:00");
}

#[test]
fn test_unparsable_date_falls_back_to_epoch() {
    for input in ["", "not a date", "Wed, 32 Foo 2017 25:61:00 +9999"] {
        let date = Timestamp::parse(input);
        assert!(date.is_fallback(), "{input:?} should fall back");
        assert_eq!(date, Timestamp::fallback());
        assert_eq!(date.datetime().timestamp(), 0);
        assert!(date.is_utc());
    }
}

#[test]
fn test_in_utc_timezone() {
    let date = Timestamp::parse("Wed, 6 Sep 2017 19:11:00 +0200");
    assert!(!date.is_utc());
    assert_eq!(
        date.in_utc_timezone().format("%Y-%m-%d %H:%M:%S").to_string(),
        "2017-09-06 17:11:00"
    );
}

#[test]
fn test_negative_offset() {
    let date = Timestamp::parse("Mon, 2 Jan 2023 08:30:00 -0500 (EST)");
    assert_eq!(date.timezone_name(), "-05:00");
    assert_eq!(date.datetime().offset().local_minus_utc(), -5 * 3600);
}

#[test]
fn test_display_is_rfc2822() {
    let date = Timestamp::parse("Fri, 27 Apr 2018 19:00:00 +0200 (CEST)");
    assert_eq!(date.to_string(), "Fri, 27 Apr 2018 19:00:00 +0200");
}
