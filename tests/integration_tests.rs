use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use std::path::{Path, PathBuf};
use toml_bridge::{
    dump, dump_with_options, host, load, load_with_options, parse, parse_with_options, Document,
    Error, HostHash, HostKey, HostObject, HostTime, HostValue, LocalZone, Options, Provenance,
    Value,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("toml_bridge_{}_{}", std::process::id(), name))
}

/// Writes `content` to a scratch file, runs `f` with its path, then removes it.
fn with_temp_toml<F: FnOnce(&Path)>(name: &str, content: &str, f: F) {
    let path = temp_path(name);
    std::fs::write(&path, content).unwrap();
    f(&path);
    let _ = std::fs::remove_file(&path);
}

fn utc() -> Options {
    Options::new().with_local_zone(LocalZone::utc())
}

fn get(text: &str, key: &str) -> HostValue {
    parse_with_options(text, utc()).unwrap().get(key).unwrap()
}

fn symbol_hash(entries: Vec<(&str, HostValue)>) -> HostValue {
    HostValue::Hash(
        entries
            .into_iter()
            .map(|(k, v)| (HostKey::Symbol(k.to_string()), v))
            .collect::<HostHash>(),
    )
}

// Scalars

#[test]
fn test_basic_strings() {
    assert_eq!(get(r#"s = "hello""#, "s"), HostValue::from("hello"));
    assert_eq!(get(r#"s = """#, "s"), HostValue::from(""));
    assert_eq!(get(r#"s = "a\nb""#, "s"), HostValue::from("a\nb"));
    assert_eq!(get(r#"s = "C:\\path""#, "s"), HostValue::from("C:\\path"));
    assert_eq!(
        get(r#"s = "quote: \"inner\"""#, "s"),
        HostValue::from("quote: \"inner\"")
    );
}

#[test]
fn test_literal_strings() {
    assert_eq!(get("s = 'raw text'", "s"), HostValue::from("raw text"));
    assert_eq!(
        get(r"s = 'C:\path\raw'", "s"),
        HostValue::from("C:\\path\\raw")
    );
    assert_eq!(get("s = ''", "s"), HostValue::from(""));
}

#[test]
fn test_multiline_strings() {
    assert_eq!(
        get("s = \"\"\"\nhello\nworld\n\"\"\"", "s"),
        HostValue::from("hello\nworld\n")
    );
    assert_eq!(
        get("s = '''\nC:\\path\\raw\nliteral\n'''", "s"),
        HostValue::from("C:\\path\\raw\nliteral\n")
    );
}

#[test]
fn test_integers() {
    assert_eq!(get("a = 0", "a"), HostValue::Integer(0));
    assert_eq!(get("a = 42", "a"), HostValue::Integer(42));
    assert_eq!(get("a = -42", "a"), HostValue::Integer(-42));
    assert_eq!(get("a = 1_000_000", "a"), HostValue::Integer(1_000_000));
    assert_eq!(get("a = 0xff", "a"), HostValue::Integer(255));
}

#[test]
fn test_floats() {
    assert_eq!(get("f = 3.14", "f"), HostValue::Float(3.14));
    assert_eq!(get("f = -0.5", "f"), HostValue::Float(-0.5));
    assert_eq!(get("f = 1e3", "f"), HostValue::Float(1000.0));
    assert_eq!(get("f = 1_000.5", "f"), HostValue::Float(1000.5));
    assert_eq!(get("f = inf", "f"), HostValue::Float(f64::INFINITY));
}

#[test]
fn test_booleans() {
    assert_eq!(get("b = true", "b"), HostValue::Bool(true));
    assert_eq!(get("b = false", "b"), HostValue::Bool(false));
}

// Arrays

#[test]
fn test_arrays() {
    assert_eq!(get("a = [1, 2, 3]", "a"), host!([1, 2, 3]));
    assert_eq!(get(r#"a = ["a", "b", "c"]"#, "a"), host!(["a", "b", "c"]));
    assert_eq!(
        get(r#"a = [1, "two", 3.0, true]"#, "a"),
        host!([1, "two", 3.0, true])
    );
    assert_eq!(get("a = [[1,2], [3,4]]", "a"), host!([[1, 2], [3, 4]]));
    assert_eq!(get("a = [\n  1,\n  2,\n  3\n]", "a"), host!([1, 2, 3]));
}

// Tables

#[test]
fn test_basic_tables() {
    let server = get("[server]\nhost = \"localhost\"\nport = 8080\n", "server");
    assert_eq!(server.get("host"), Some(&HostValue::from("localhost")));
    assert_eq!(server.get("port"), Some(&HostValue::Integer(8080)));
}

#[test]
fn test_nested_tables() {
    let a = get("[a]\nx = 1\n\n[a.b]\ny = 2\n\n[a.b.c]\nz = 3\n", "a");
    assert_eq!(a.get("x"), Some(&HostValue::Integer(1)));
    let b = a.get("b").unwrap();
    assert_eq!(b.get("y"), Some(&HostValue::Integer(2)));
    assert_eq!(
        b.get("c").and_then(|c| c.get("z")),
        Some(&HostValue::Integer(3))
    );
}

#[test]
fn test_dotted_keys_match_table_headers() {
    let dotted = get("a.b.c = 1\na.b.d = 2\n", "a");
    let b = dotted.get("b").unwrap();
    assert_eq!(b.get("c"), Some(&HostValue::Integer(1)));
    assert_eq!(b.get("d"), Some(&HostValue::Integer(2)));

    let header = parse("[a.b]\nc = 1\n").unwrap();
    let dotted = parse("a.b.c = 1\n").unwrap();
    assert_eq!(header.root(), dotted.root());
}

#[test]
fn test_array_of_tables() {
    let fruit = get(
        "[[fruit]]\nname = \"apple\"\ncolor = \"red\"\n\n\
         [[fruit]]\nname = \"banana\"\ncolor = \"yellow\"\n",
        "fruit",
    );
    let fruits = fruit.as_array().unwrap();
    assert_eq!(fruits.len(), 2);
    assert_eq!(fruits[0].get("name"), Some(&HostValue::from("apple")));
    assert_eq!(fruits[0].get("color"), Some(&HostValue::from("red")));
    assert_eq!(fruits[1].get("name"), Some(&HostValue::from("banana")));
    assert_eq!(fruits[1].get("color"), Some(&HostValue::from("yellow")));
}

#[test]
fn test_inline_tables() {
    let point = get("point = { x = 1, y = 2 }", "point");
    assert_eq!(point.get("x"), Some(&HostValue::Integer(1)));
    assert_eq!(point.get("y"), Some(&HostValue::Integer(2)));
}

// Dates and times

#[test]
fn test_local_date() {
    let d = get("d = 2024-01-02", "d");
    let tagged = d.as_time().unwrap();
    assert_eq!(tagged.provenance, Some(Provenance::LocalDate));
    let t = &tagged.time;
    assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 2));
    assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
}

#[test]
fn test_local_time() {
    let t = get("t = 12:34:56", "t");
    let tagged = t.as_time().unwrap();
    assert_eq!(tagged.provenance, Some(Provenance::LocalTime));
    let t = &tagged.time;
    assert_eq!((t.hour(), t.minute(), t.second()), (12, 34, 56));
    assert_eq!((t.year(), t.month(), t.day()), (1970, 1, 1));
}

#[test]
fn test_local_datetime() {
    let dt = get("dt = 2024-01-02T12:34:56.250", "dt");
    let tagged = dt.as_time().unwrap();
    assert_eq!(tagged.provenance, Some(Provenance::LocalDateTime));
    let t = &tagged.time;
    assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 2));
    assert_eq!((t.hour(), t.minute(), t.second()), (12, 34, 56));
    assert_eq!(t.usec(), 250_000);
}

#[test]
fn test_local_values_use_configured_zone() {
    let tokyo = LocalZone::east_minutes(9 * 60).unwrap();
    let doc = parse_with_options("dt = 2024-01-02T12:00:00", utc().with_local_zone(tokyo)).unwrap();
    let time = doc.get("dt").unwrap().as_time().unwrap().time;
    assert_eq!(time.timezone_offset(), -9 * 3600);
    assert_eq!(time.to_utc(), Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap());
}

#[test]
fn test_offset_datetime_z() {
    let z = get("z = 2024-01-02T12:34:56Z", "z");
    let tagged = z.as_time().unwrap();
    assert_eq!(tagged.provenance, Some(Provenance::OffsetDateTime));
    assert_eq!(tagged.time.timezone_offset(), 0);
    assert!(tagged.time.is_utc());
}

#[test]
fn test_offset_datetime_utc_conversion() {
    let cases: [(i64, i64); 7] = [(0, 0), (2, 0), (2, 30), (-5, 0), (-5, 30), (12, 59), (-12, 59)];
    let naive = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(12, 34, 56))
        .unwrap();

    for (h, m) in cases {
        let sign = if h < 0 { '-' } else { '+' };
        let text = format!("dt = 2024-01-02T12:34:56{}{:02}:{:02}", sign, h.abs(), m);
        let magnitude = h.abs() * 60 + m;
        let offset_minutes = if h < 0 { -magnitude } else { magnitude };

        let dt = get(&text, "dt");
        let time = dt.as_time().unwrap().time;

        let expected = Utc.from_utc_datetime(&naive) - chrono::Duration::minutes(offset_minutes);
        assert_eq!(time.to_utc(), expected, "{}", text);
        assert_eq!(i64::from(time.timezone_offset()), -offset_minutes * 60, "{}", text);
        assert_eq!((time.hour(), time.minute(), time.second()), (12, 34, 56));
    }
}

#[test]
fn test_offset_datetime_keeps_offset_through_round_trip() {
    let doc = parse("odt = 2024-01-01T12:00:00+09:00").unwrap();
    let host = doc.get("odt").unwrap();
    let time = host.as_time().unwrap().time;
    assert_eq!(time.to_utc(), Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap());

    let mut out = Document::new();
    out.insert("odt", &host).unwrap();
    assert_eq!(
        out.to_toml_string().unwrap(),
        "odt = 2024-01-01T12:00:00+09:00\n"
    );
}

#[test]
fn test_local_and_offset_kinds_stay_distinct() {
    let doc = parse_with_options(
        "ldt = 2024-01-01T12:00:00\nodt = 2024-01-01T12:00:00Z",
        utc(),
    )
    .unwrap();
    let ldt = doc.get("ldt").unwrap();
    let odt = doc.get("odt").unwrap();
    assert_eq!(ldt.as_time().unwrap().time, odt.as_time().unwrap().time);
    assert_ne!(ldt, odt);

    let mut out = Document::with_options(utc());
    out.insert("ldt", &ldt).unwrap();
    out.insert("odt", &odt).unwrap();
    assert_eq!(
        out.to_toml_string().unwrap(),
        "ldt = 2024-01-01T12:00:00\nodt = 2024-01-01T12:00:00Z\n"
    );
}

#[test]
fn test_sub_microsecond_digits_are_dropped() {
    let doc = parse_with_options("t = 01:02:03.123456789", utc()).unwrap();
    let host = doc.get("t").unwrap();
    assert_eq!(host.as_time().unwrap().time.usec(), 123_456);

    let mut out = Document::with_options(utc());
    out.insert("t", &host).unwrap();
    assert_eq!(out.to_toml_string().unwrap(), "t = 01:02:03.123456\n");
}

// Load and dump

#[test]
fn test_basic_load() {
    let content = "title = \"Example\"\ncount = 42\npi = 3.14\nactive = true\n\n\
                   [server]\nhost = \"localhost\"\nport = 8080\n\nnums = [1, 2, 3]\n";
    with_temp_toml("basic.toml", content, |path| {
        let doc = load(path).unwrap();
        assert_eq!(doc.get("title").unwrap(), HostValue::from("Example"));
        assert_eq!(doc.get("count").unwrap(), HostValue::Integer(42));
        assert_eq!(doc.get("pi").unwrap(), HostValue::Float(3.14));
        assert_eq!(doc.get("active").unwrap(), HostValue::Bool(true));

        let server = doc.get("server").unwrap();
        assert_eq!(server.get("host"), Some(&HostValue::from("localhost")));
        assert_eq!(server.get("port"), Some(&HostValue::Integer(8080)));
        assert_eq!(server.get("nums"), Some(&host!([1, 2, 3])));
    });
}

#[test]
fn test_dump_round_trip_scalars() {
    let h = symbol_hash(vec![
        ("bool", HostValue::Bool(true)),
        ("int", HostValue::Integer(1)),
        ("float", HostValue::Float(1.0)),
        ("str", HostValue::from("hello")),
    ]);
    with_temp_toml("round_scalars.toml", "", |path| {
        assert_eq!(dump(&h, Some(path)).unwrap(), None);
        let doc = load(path).unwrap();
        assert_eq!(doc.get("bool").unwrap(), HostValue::Bool(true));
        assert_eq!(doc.get("int").unwrap(), HostValue::Integer(1));
        assert_eq!(doc.get("float").unwrap(), HostValue::Float(1.0));
        assert_eq!(doc.get("str").unwrap(), HostValue::from("hello"));
    });
}

#[test]
fn test_dump_round_trip_arrays() {
    let h = symbol_hash(vec![
        ("nums", host!([1, 2, 3])),
        ("mix", host!([1, "two", 3.0, true])),
    ]);
    with_temp_toml("round_arrays.toml", "", |path| {
        dump(&h, Some(path)).unwrap();
        let doc = load(path).unwrap();
        assert_eq!(doc.get("nums").unwrap(), host!([1, 2, 3]));
        assert_eq!(doc.get("mix").unwrap(), host!([1, "two", 3.0, true]));
    });
}

#[test]
fn test_dump_round_trip_utc_time() {
    let now = HostTime::from(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
    let h = symbol_hash(vec![("time", HostValue::from(now))]);
    with_temp_toml("round_time.toml", "", |path| {
        dump(&h, Some(path)).unwrap();
        let doc = load(path).unwrap();
        let back = doc.get("time").unwrap();
        assert_eq!(back.as_time().unwrap().time, now);
        assert!(back.as_time().unwrap().time.is_utc());
    });
}

#[test]
fn test_dump_round_trip_local_time_keeps_offset() {
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let local = HostTime::from(tokyo.with_ymd_and_hms(2024, 1, 2, 12, 34, 56).unwrap());
    let h = symbol_hash(vec![("dt", HostValue::from(local))]);
    with_temp_toml("round_trip_datetime.toml", "", |path| {
        dump(&h, Some(path)).unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "dt = 2024-01-02T12:34:56+09:00\n"
        );
        let back = load(path).unwrap().get("dt").unwrap();
        let time = back.as_time().unwrap().time;
        assert_eq!(time.timestamp(), local.timestamp());
        assert_eq!(time.timezone_offset(), -9 * 3600);
    });
}

#[test]
fn test_dump_document_to_string() {
    let doc = parse("b = 1\na = \"x\"\n[t]\nk = true\n").unwrap();
    assert_eq!(
        dump(&doc, None).unwrap().as_deref(),
        Some("b = 1\na = \"x\"\n\n[t]\nk = true\n")
    );
}

#[test]
fn test_dump_non_table_host_values_inline() {
    assert_eq!(dump(&host!([1, 2]), None).unwrap().as_deref(), Some("[1, 2]"));
    assert_eq!(dump(&host!("hi"), None).unwrap().as_deref(), Some("\"hi\""));
    assert!(matches!(dump(&host!(null), None), Err(Error::Serialize(_))));
}

#[test]
fn test_dump_bare_host_time_as_datetime_literal() {
    let time = HostTime::from(Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap());
    assert_eq!(
        dump(&HostValue::from(time), None).unwrap().as_deref(),
        Some("2024-01-01T03:00:00Z")
    );

    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let local = HostTime::from(tokyo.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    with_temp_toml("bare_time.toml", "", |path| {
        assert_eq!(dump(&HostValue::from(local), Some(path)).unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "2024-01-01T12:00:00+09:00"
        );
    });
}

#[test]
fn test_leap_seconds_can_be_looked_up() {
    let doc = parse_with_options("t = 23:59:60
ldt = 2016-12-31T23:59:60", utc()).unwrap();

    let t = doc.get("t").unwrap();
    let time = t.as_time().unwrap().time;
    assert_eq!((time.hour(), time.minute(), time.second()), (23, 59, 60));

    let ldt = doc.get("ldt").unwrap();
    let time = ldt.as_time().unwrap().time;
    assert_eq!((time.year(), time.month(), time.day()), (2016, 12, 31));
    assert_eq!(time.second(), 60);

    let mut out = Document::with_options(utc());
    out.insert("t", &t).unwrap();
    out.insert("ldt", &ldt).unwrap();
    assert_eq!(
        out.to_toml_string().unwrap(),
        "t = 23:59:60
ldt = 2016-12-31T23:59:60
"
    );
}

#[test]
fn test_sub_minute_host_offset_cannot_be_dumped() {
    let odd = FixedOffset::east_opt(30).unwrap();
    let time = HostTime::from(odd.with_ymd_and_hms(2024, 1, 1, 12, 0, 30).unwrap());
    let err = dump(&symbol_hash(vec![("at", HostValue::from(time))]), None).unwrap_err();
    assert!(matches!(err, Error::TemporalConstruction { .. }));
}

#[test]
fn test_dump_pretty() {
    let h = host!({"nums": [1, 2, 3]});
    let compact = dump(&h, None).unwrap().unwrap();
    let pretty = dump_with_options(&h, None, &Options::pretty()).unwrap().unwrap();
    assert_ne!(compact, pretty);
    assert_eq!(parse(&pretty).unwrap().root(), parse(&compact).unwrap().root());
}

#[test]
fn test_dump_duplicate_stringified_keys_last_wins() {
    let mut hash = HostHash::new();
    hash.insert(HostKey::from("a"), HostValue::from(1));
    hash.insert(HostKey::Symbol("a".to_string()), HostValue::from(2));
    assert_eq!(
        dump(&HostValue::Hash(hash), None).unwrap().as_deref(),
        Some("a = 2\n")
    );
}

#[test]
fn test_dump_unconvertible_object_writes_nothing() {
    let path = temp_path("never_written.toml");
    let _ = std::fs::remove_file(&path);
    let h = host!({"ok": 1});
    let mut hash = h.as_hash().unwrap().clone();
    hash.insert(HostKey::from("bad"), HostValue::Object(HostObject::new("Proc")));

    let err = dump(&HostValue::Hash(hash), Some(&path)).unwrap_err();
    assert_eq!(err, Error::type_conversion("Proc"));
    assert!(!path.exists());
}

#[test]
fn test_dump_to_missing_directory_is_io_error() {
    let path = temp_path("no_such_dir").join("out.toml");
    let err = dump(&host!({"a": 1}), Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("out.toml"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = load(temp_path("does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_with_options_carries_options() {
    with_temp_toml("options.toml", "d = 2024-01-02", |path| {
        let doc = load_with_options(path, utc()).unwrap();
        assert_eq!(doc.options().local_zone, LocalZone::utc());
        let time = doc.get("d").unwrap().as_time().unwrap().time;
        assert!(time.is_utc());
    });
}

#[test]
fn test_many_keys() {
    let content = (0..100)
        .map(|i| format!("k{} = {}", i, i))
        .collect::<Vec<_>>()
        .join("\n");
    with_temp_toml("many_keys.toml", &content, |path| {
        let doc = load(path).unwrap();
        for i in 0..100 {
            assert_eq!(doc.get(&format!("k{}", i)).unwrap(), HostValue::Integer(i));
        }
    });
}

// Errors

#[test]
fn test_invalid_documents_are_parse_errors() {
    for text in [
        "a = 1_",
        "d = 2024-13-01",
        "t = 25:00:00",
        "a = 1\na = 2",
        "[a]\n[b]\n[a]\n",
        "just text",
    ] {
        match parse(text) {
            Err(Error::Parse(msg)) => assert!(!msg.is_empty(), "{}", text),
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_parse_error_message_prefix() {
    let err = parse("a = = 1").unwrap_err();
    assert!(err.to_string().starts_with("TOML parse error: "));
}

#[test]
fn test_scalar_top_level_is_structural() {
    assert_eq!(parse("42").unwrap_err(), Error::structural("integer"));
    assert_eq!(parse("\"just text\"").unwrap_err(), Error::structural("string"));
    assert_eq!(
        parse("42").unwrap_err().to_string(),
        "TOML root must be a table, found integer"
    );
}

#[test]
fn test_missing_key() {
    let doc = parse("x = 1").unwrap();
    assert_eq!(doc.get("y"), Err(Error::missing_key("y")));
    assert_eq!(doc.get("x").unwrap(), HostValue::Integer(1));
    assert_eq!(doc.get_value("x").unwrap(), &Value::Integer(1));
}

#[test]
fn test_version() {
    assert_eq!(toml_bridge::TOML_VERSION, "1.0.0");
}
