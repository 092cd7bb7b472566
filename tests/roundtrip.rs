//! End-to-end behaviour of the public encode and decode API.

use rowpack::prelude::*;

const PERSON: [(&str, &str); 3] = [("id", "bigint"), ("age", "int"), ("name", "varchar255")];

fn person(id: i64, age: i64, name: &str) -> Row {
    Row::from([
        ("id".to_string(), Value::from(id)),
        ("age".to_string(), Value::from(age)),
        ("name".to_string(), Value::from(name)),
    ])
}

/// Small xorshift generator so the mixed-row test is reproducible without extra crates.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

#[test]
fn person_scenario() {
    let rows = vec![person(1, 30, "Ann"), person(2, 41, "Bo")];

    let data = serialize(&rows, PERSON).unwrap();
    assert_eq!(data.len(), 2 * (8 + 4 + 1 + 3 + 1));

    // id
    assert_eq!(&data[0..8], 1_i64.to_ne_bytes());
    // age
    assert_eq!(&data[8..12], 30_i32.to_ne_bytes());
    // name
    assert_eq!(&data[12..17], &[0x03, b'A', b'n', b'n', 0x00]);
    // second row
    assert_eq!(&data[17..25], 2_i64.to_ne_bytes());
    assert_eq!(&data[25..29], 41_i32.to_ne_bytes());
    assert_eq!(&data[29..34], &[0x02, b'B', b'o', 0x00]);

    let decoded = unserialize(&data, PERSON).unwrap();
    assert_eq!(decoded, rows);
}

#[test]
fn mixed_rows_round_trip() {
    let schema = Schema::parse([
        ("a", "varchar255"),
        ("b", "int"),
        ("c", "bigint"),
        ("d", "varchar255"),
    ])
    .unwrap();

    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let rows: Vec<Row> = (0..200)
        .map(|_| {
            let a_len = (rng.next() % 256) as usize;
            let a: Vec<u8> = (0..a_len).map(|_| (rng.next() % 256) as u8).collect();
            let d_len = (rng.next() % 8) as usize;
            let d: Vec<u8> = (0..d_len).map(|_| b'a' + (rng.next() % 26) as u8).collect();

            Row::from([
                ("a".to_string(), Value::Text(a)),
                ("b".to_string(), Value::Integer(i64::from(rng.next() as i32))),
                ("c".to_string(), Value::Integer(rng.next() as i64)),
                ("d".to_string(), Value::Text(d)),
            ])
        })
        .collect();

    let data = encode(&rows, &schema).unwrap();
    assert_eq!(data.len(), encoded_len(&rows, &schema, CodecOptions::default()).unwrap());
    assert_eq!(decode(&data, &schema).unwrap(), rows);
}

#[test]
fn integer_extremes_round_trip() {
    let schema = Schema::parse([("big", "bigint"), ("small", "int")]).unwrap();
    let rows: Vec<Row> = [
        (i64::MIN, i32::MIN),
        (i64::MAX, i32::MAX),
        (0, 0),
        (-1, -1),
    ]
    .into_iter()
    .map(|(big, small)| {
        Row::from([
            ("big".to_string(), Value::from(big)),
            ("small".to_string(), Value::from(small)),
        ])
    })
    .collect();

    let data = encode(&rows, &schema).unwrap();
    assert_eq!(data.len(), rows.len() * 12);
    assert_eq!(decode(&data, &schema).unwrap(), rows);
}

#[test]
fn empty_input() {
    let rows: Vec<Row> = Vec::new();

    for definitions in [
        vec![("id", "bigint")],
        vec![("name", "varchar255")],
        PERSON.to_vec(),
    ] {
        let data = serialize(&rows, definitions.clone()).unwrap();
        assert!(data.is_empty());
        assert!(unserialize(&data, definitions).unwrap().is_empty());
    }
}

#[test]
fn missing_column_names_column() {
    let mut incomplete = person(2, 41, "Bo");
    incomplete.remove("age");
    let rows = vec![person(1, 30, "Ann"), incomplete];

    assert_eq!(
        serialize(&rows, PERSON),
        Err(Error::MissingColumn("age".to_string()))
    );
}

#[test]
fn type_mismatch_names_column() {
    let mut text_in_int = person(1, 30, "Ann");
    text_in_int.insert("age".to_string(), Value::from("30"));

    match serialize(&[text_in_int], PERSON) {
        Err(Error::TypeMismatch {
            column, expected, ..
        }) => {
            assert_eq!(column, "age");
            assert_eq!(expected, ColumnType::Int);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    let mut int_in_text = person(1, 30, "Ann");
    int_in_text.insert("name".to_string(), Value::from(5_i64));

    assert!(matches!(
        serialize(&[int_in_text], PERSON),
        Err(Error::TypeMismatch { column, expected: ColumnType::VarChar255, .. }) if column == "name"
    ));
}

#[test]
fn oversize_text() {
    let definitions = [("name", "varchar255")];
    let ok = vec![Row::from([("name".to_string(), Value::Text(vec![b'x'; 255]))])];
    let over = vec![Row::from([("name".to_string(), Value::Text(vec![b'x'; 256]))])];

    assert_eq!(serialize(&ok, definitions).unwrap().len(), 257);
    assert!(matches!(
        serialize(&over, definitions),
        Err(Error::StringTooLong { len: 256, .. })
    ));
}

#[test]
fn truncation_on_fixed_width() {
    let schema = Schema::parse([("a", "bigint"), ("b", "int")]).unwrap();

    for len in [1, 11, 13, 23] {
        let data = vec![0_u8; len];
        assert!(
            matches!(decode(&data, &schema), Err(Error::TruncatedBuffer { .. })),
            "length {len} should be rejected"
        );
    }

    assert_eq!(decode(&[0_u8; 24], &schema).unwrap().len(), 2);
}

#[test]
fn truncation_every_prefix() {
    let rows = vec![person(1, 30, "Ann"), person(2, 41, "Bo")];
    let data = serialize(&rows, PERSON).unwrap();

    // 17 is the only interior row boundary
    for cut in (1..data.len()).filter(|cut| *cut != 17) {
        assert!(
            matches!(
                unserialize(&data[..cut], PERSON),
                Err(Error::TruncatedBuffer { .. })
            ),
            "prefix of {cut} bytes should be rejected"
        );
    }

    assert_eq!(unserialize(&data[..17], PERSON).unwrap(), rows[..1]);
}

#[test]
fn invalid_schema() {
    let rows: Vec<Row> = Vec::new();

    assert_eq!(
        serialize(&rows, [("id", "bigint"), ("name", "varchar")]),
        Err(Error::InvalidColumnType {
            column: "name".to_string(),
            given: "varchar".to_string()
        })
    );
    assert_eq!(
        unserialize(&[], [("id", "BIGINT")]),
        Err(Error::InvalidColumnType {
            column: "id".to_string(),
            given: "BIGINT".to_string()
        })
    );
    assert_eq!(
        unserialize(&[], [("id", "bigint"), ("id", "int")]),
        Err(Error::DuplicateColumn("id".to_string()))
    );
}

#[test]
fn schema_mismatch_is_not_detected() {
    let written = Schema::parse([("a", "int"), ("b", "int")]).unwrap();
    let read = Schema::parse([("a", "bigint")]).unwrap();

    let rows = vec![Row::from([
        ("a".to_string(), Value::from(1_i64)),
        ("b".to_string(), Value::from(2_i64)),
    ])];
    let data = encode(&rows, &written).unwrap();

    // same width, different meaning: decodes without error
    let decoded = decode(&data, &read).unwrap();
    assert_eq!(decoded.len(), 1);
    assert!(decoded[0].contains_key("a"));
    assert!(!decoded[0].contains_key("b"));
}

#[test]
fn lenient_options() {
    let schema = Schema::parse([("n", "int"), ("s", "varchar255")]).unwrap();
    let rows = vec![Row::from([
        ("n".to_string(), Value::from(i64::from(u32::MAX) + 2)),
        ("s".to_string(), Value::from("ok")),
    ])];

    assert!(matches!(
        encode(&rows, &schema),
        Err(Error::IntOutOfRange { .. })
    ));

    let mut data = encode_with_options(&rows, &schema, CodecOptions::lenient()).unwrap();
    let last = data.len() - 1;
    data[last] = 0xAA;

    assert!(matches!(
        decode(&data, &schema),
        Err(Error::InvalidTerminator { found: 0xAA, .. })
    ));

    let decoded = decode_with_options(&data, &schema, CodecOptions::lenient()).unwrap();
    assert_eq!(decoded[0]["n"], Value::Integer(1));
    assert_eq!(decoded[0]["s"], Value::from("ok"));
}

#[test]
fn shared_schema_across_threads() {
    let schema = Schema::parse(PERSON).unwrap();

    std::thread::scope(|scope| {
        for id in 0..4_i64 {
            let schema = &schema;
            scope.spawn(move || {
                let rows = vec![person(id, id * 10, "t")];
                let data = encode(&rows, schema).unwrap();
                assert_eq!(decode(&data, schema).unwrap(), rows);
            });
        }
    });
}
