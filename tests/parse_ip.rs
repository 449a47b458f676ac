use std::net::{Ipv4Addr, Ipv6Addr};
use urlbuf::ip;

#[test]
fn v4_through_host() {
    use urlbuf::{HostType, Url};

    let u = Url::parse("//127.0.0.1").unwrap();
    assert_eq!(u.host_type(), HostType::Ipv4);
    assert_eq!(u.ipv4_address(), Some(Ipv4Addr::LOCALHOST));

    let u = Url::parse("//255.255.255.255:65535").unwrap();
    assert_eq!(u.ipv4_address(), Some(Ipv4Addr::BROADCAST));
    assert_eq!(u.port_number(), Some(65535));
}

#[test]
fn v4_bounds() {
    assert_eq!(
        ip::parse_v4(b"0.0.0.0"),
        Some(Ipv4Addr::new(0, 0, 0, 0))
    );
    assert_eq!(
        ip::parse_v4(b"255.255.255.255"),
        Some(Ipv4Addr::new(255, 255, 255, 255))
    );
    assert_eq!(ip::parse_v4(b"256.1.1.1"), None);
    assert_eq!(ip::parse_v4(b"1.1.1.260"), None);
    // leading zeros are not octal
    assert_eq!(ip::parse_v4(b"192.168.0.010"), None);
    assert_eq!(ip::parse_v4(b"00.0.0.0"), None);
}

#[test]
fn v6_through_host() {
    use urlbuf::{HostType, Url};

    for (s, addr) in [
        ("::1", Ipv6Addr::LOCALHOST),
        ("::", Ipv6Addr::UNSPECIFIED),
        ("2001:db8::7", Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 7)),
        (
            "::ffff:192.0.2.33",
            Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x221),
        ),
        (
            "1:2:3:4:5:6:7:8",
            Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8),
        ),
    ] {
        let u = Url::parse(&format!("//[{s}]/")).unwrap();
        assert_eq!(u.host_type(), HostType::Ipv6, "{s}");
        assert_eq!(u.ipv6_address(), Some(addr), "{s}");
    }

    for s in [
        "//[:]",
        "//[::00000]",
        "//[1:2:3:4:5:6:7]",
        "//[1:2:3:4:5:6:7:8:9]",
        "//[1::2::3]",
        "//[1:2:3:4::5:6:7:8]",
        "//[::127.0.0.1:]",
    ] {
        assert!(Url::parse(s).is_err(), "{s}");
    }
}

#[test]
fn v6_serialization_round_trip() {
    use urlbuf::Url;

    // the canonical form produced by set_host_ipv6 parses back
    for addr in [
        Ipv6Addr::LOCALHOST,
        Ipv6Addr::UNSPECIFIED,
        Ipv6Addr::new(0x2a02, 0x6b8, 0, 0, 0, 0, 0x11, 0x11),
        Ipv6Addr::new(0, 0, 0x11, 0, 0, 0, 0, 0),
        Ipv6Addr::new(0xfe80, 0, 0, 0, 0xabcd, 0, 0, 1),
    ] {
        let mut u = Url::new();
        u.set_host_ipv6(addr).unwrap();
        let parsed = Url::parse(u.as_str()).unwrap();
        assert_eq!(parsed.ipv6_address(), Some(addr), "{addr}");
    }
}
