use urlbuf::encoding::{encode, encoded_len, table, validate, EStr};
use urlbuf::Error;

#[test]
fn encode_per_component() {
    // what must be escaped differs by component
    assert_eq!(encode("a/b", table::REG_NAME), "a%2fb");
    assert_eq!(encode("a/b", table::PATH), "a/b");
    assert_eq!(encode("a?b", table::PATH), "a%3fb");
    assert_eq!(encode("a?b", table::QUERY), "a?b");
    assert_eq!(encode("a#b", table::QUERY), "a%23b");
    assert_eq!(encode(":", table::USERINFO), ":");
    assert_eq!(encode(":", table::USERINFO_NC), "%3a");
}

#[test]
fn encode_non_ascii() {
    assert_eq!(encode("résumé", table::PATH), "r%c3%a9sum%c3%a9");
    assert_eq!(encode("你好", table::REG_NAME), "%e4%bd%a0%e5%a5%bd");
}

#[test]
fn encoded_len_agrees() {
    for s in ["", "abc", "a b c", "100%", "ünïcödé", "/:@?#[]"] {
        for t in [table::PCHAR, table::QUERY, table::REG_NAME, table::USERINFO] {
            assert_eq!(encode(s, t).len(), encoded_len(s, t), "{s}");
        }
    }
}

#[test]
fn validate_errors() {
    assert!(validate("ok-._~%20", table::PCHAR).is_ok());
    assert_eq!(
        validate("%2x", table::PCHAR).unwrap_err(),
        Error::BadPctHexDig
    );
    assert_eq!(validate("%2", table::PCHAR).unwrap_err(), Error::BadPctHexDig);
    assert_eq!(
        validate("a b", table::PCHAR).unwrap_err(),
        Error::IllegalReservedChar
    );
    assert_eq!(
        validate("[", table::REG_NAME).unwrap_err(),
        Error::IllegalReservedChar
    );
}

#[test]
fn decode() {
    let estr = EStr::new("%20%41%61%7e").unwrap();
    assert_eq!(estr.decode().as_bytes(), b" Aa~");

    // both hex cases decode
    let estr = EStr::new("%C3%A9%c3%a9").unwrap();
    assert_eq!(estr.decode().into_string_lossy(), "éé");

    // no allocation when nothing is encoded
    let estr = EStr::new("plain").unwrap();
    assert!(matches!(
        estr.decode().into_bytes(),
        std::borrow::Cow::Borrowed(_)
    ));

    // invalid UTF-8 decodes lossily
    let estr = EStr::new("%ff").unwrap();
    assert_eq!(estr.decode().into_string_lossy(), "\u{fffd}");
    assert!(estr.decode().into_string().is_err());
}

#[test]
fn estr_new_rejects_bad_octets() {
    assert!(EStr::new("%").is_none());
    assert!(EStr::new("a%4").is_none());
    assert!(EStr::new("%gg").is_none());
    assert!(EStr::new("%2f").is_some());
}

#[test]
fn encode_decode_round_trip() {
    let raws = [
        "plain",
        "with space",
        "per%cent",
        "déjà vu",
        "a+b",
        "key=value&key2=value2",
        "/path?query#frag",
    ];
    for raw in raws {
        for t in [
            table::USERINFO_NC,
            table::USERINFO,
            table::REG_NAME,
            table::PATH,
            table::QUERY,
            table::FRAGMENT,
        ] {
            let enc = encode(raw, t);
            assert!(validate(&enc, t).is_ok(), "{raw}");
            let estr = EStr::new(&enc).unwrap();
            assert_eq!(estr.decode().as_bytes(), raw.as_bytes(), "{raw}");
        }
    }
}

#[test]
fn split() {
    let query = EStr::new("a=1&b=2&c").unwrap();
    let pairs: Vec<_> = query
        .split('&')
        .map(|s| s.split_once('=').map_or((s.as_str(), None), |(k, v)| (k.as_str(), Some(v.as_str()))))
        .collect();
    assert_eq!(
        pairs,
        [("a", Some("1")), ("b", Some("2")), ("c", None)]
    );
}
