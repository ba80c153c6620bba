use super::*;

fn root_of(doc: &Document<'_>) -> NodeRef {
    doc.root().expect("decoded document has a root")
}

fn nested_lists(depth: usize) -> Vec<u8> {
    let mut data = vec![b'l'; depth];
    data.extend(std::iter::repeat(b'e').take(depth));
    data
}

fn int_list(len: usize) -> Vec<u8> {
    let mut data = b"l".to_vec();
    for _ in 0..len {
        data.extend_from_slice(b"i0e");
    }
    data.push(b'e');
    data
}

fn long_string(len: usize) -> Vec<u8> {
    let mut data = format!("{len}:").into_bytes();
    data.extend(std::iter::repeat(b'x').take(len));
    data
}

fn strings<'d>(doc: &'d Document<'_>, node: NodeRef) -> Vec<&'d [u8]> {
    doc.children(node)
        .map(|child| doc.as_bytes(child).unwrap())
        .collect()
}

#[test]
fn test_decode_integer() {
    let cases: [(&[u8], &[u8]); 5] = [
        (b"i42e", b"42"),
        (b"i-42e", b"-42"),
        (b"i0e", b"0"),
        (b"i3e", b"3"),
        (b"i-3e", b"-3"),
    ];
    for (input, digits) in cases {
        let doc = decode(input).unwrap();
        let root = root_of(&doc);
        assert!(doc.node(root).unwrap().is_number());
        assert_eq!(doc.as_bytes(root), Some(digits));
    }
}

#[test]
fn test_decode_negative_zero_is_accepted() {
    let doc = decode(b"i-0e").unwrap();
    assert_eq!(doc.as_bytes(root_of(&doc)), Some(b"-0".as_slice()));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(decode(b"i03e"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i01e"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i00e"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"ie"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i-e"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i--1e"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i1x"), Err(BencodeError::InvalidInteger(0))));
    assert!(matches!(decode(b"i12"), Err(BencodeError::UnexpectedEof(3))));
}

#[test]
fn test_decode_integer_length_cap() {
    let doc = decode(b"i-999999999999999999e").unwrap();
    assert_eq!(doc.node(root_of(&doc)).unwrap().len(), 19);

    let err = decode(b"i12345678901234567890e").unwrap_err();
    assert!(matches!(err, BencodeError::NumberTooLong(0)));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert_eq!(
        err.to_string(),
        format!(
            "integer at byte 0 has more than {} characters",
            crate::constants::MAX_NUMBER_LEN
        )
    );
}

#[test]
fn test_decode_bytes() {
    let doc = decode(b"4:spam").unwrap();
    let root = root_of(&doc);
    assert_eq!(
        doc.node(root).unwrap(),
        Node::String(ByteRef::Borrowed { offset: 2, len: 4 })
    );
    assert_eq!(doc.as_str(root), Some("spam"));

    let doc = decode(b"0:").unwrap();
    let root = root_of(&doc);
    assert_eq!(doc.as_bytes(root), Some(b"".as_slice()));
    assert!(doc.node(root).unwrap().is_empty());
}

#[test]
fn test_decode_bytes_invalid() {
    assert!(matches!(decode(b"5:spam"), Err(BencodeError::UnexpectedEof(6))));
    assert!(matches!(decode(b"01:a"), Err(BencodeError::InvalidStringLength(0))));
    assert!(matches!(decode(b"4spam"), Err(BencodeError::InvalidStringLength(0))));
    assert!(matches!(decode(b"4"), Err(BencodeError::UnexpectedEof(1))));
    assert!(matches!(
        decode(b"99999999999999999999999:a"),
        Err(BencodeError::InvalidStringLength(0))
    ));
}

#[test]
fn test_decode_list() {
    let doc = decode(b"l4:spam4:eggse").unwrap();
    let root = root_of(&doc);
    assert!(doc.node(root).unwrap().is_list());
    assert_eq!(doc.count(root), Some(2));
    assert_eq!(strings(&doc, root), vec![&b"spam"[..], b"eggs"]);

    let doc = decode(b"le").unwrap();
    let root = root_of(&doc);
    assert_eq!(
        doc.node(root).unwrap(),
        Node::List {
            count: 0,
            first_child: None
        }
    );
}

#[test]
fn test_decode_dict() {
    let doc = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let root = root_of(&doc);
    assert_eq!(doc.count(root), Some(4));
    assert_eq!(
        strings(&doc, root),
        vec![&b"cow"[..], b"moo", b"spam", b"eggs"]
    );
    let moo = doc.dict_get(root, b"cow").unwrap();
    assert_eq!(doc.as_str(moo), Some("moo"));
    assert_eq!(doc.dict_get(root, b"moo"), None);
}

#[test]
fn test_decode_empty_dict() {
    let doc = decode(b"de").unwrap();
    let root = root_of(&doc);
    assert!(doc.node(root).unwrap().is_dictionary());
    assert_eq!(doc.count(root), Some(0));
    assert_eq!(doc.entries(root).count(), 0);
}

#[test]
fn test_dict_keys_kept_as_written() {
    let doc = decode(b"d4:spam1:x1:ai1e1:ai2ee").unwrap();
    let root = root_of(&doc);
    let keys: Vec<_> = doc
        .entries(root)
        .map(|(k, _)| doc.as_bytes(k).unwrap())
        .collect();
    assert_eq!(keys, vec![&b"spam"[..], b"a", b"a"]);

    let first = doc.get("a").unwrap();
    assert_eq!(doc.as_bytes(first), Some(b"1".as_slice()));
}

#[test]
fn test_dict_key_must_be_string() {
    assert!(matches!(
        decode(b"di1ei2ee"),
        Err(BencodeError::UnexpectedChar { byte: 'i', offset: 1 })
    ));
    assert!(matches!(decode(b"d3:cowe"), Err(BencodeError::UnexpectedChar { byte: 'e', offset: 6 })));
    assert!(matches!(decode(b"d3:cow"), Err(BencodeError::UnexpectedEof(6))));
}

#[test]
fn test_depth_boundary() {
    let ok = nested_lists(63);
    let doc = decode(&ok).unwrap();
    assert_eq!(doc.pool().len(), 63);

    let deep = nested_lists(64);
    let err = decode(&deep).unwrap_err();
    assert!(matches!(err, BencodeError::NestingTooDeep(63)));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_depth_boundary_configurable() {
    let options = DecodeOptions::default().with_max_depth(3);
    assert!(decode_with(b"ld1:ai1eee", options).is_ok());
    assert!(matches!(
        decode_with(b"ld1:ali1eeee", options),
        Err(BencodeError::NestingTooDeep(_))
    ));
}

#[test]
fn test_string_length_limit() {
    let options = DecodeOptions::default().with_profile(WidthProfile::Narrow);

    let mut ok = b"31:".to_vec();
    ok.extend([b'x'; 31]);
    assert!(decode_with(&ok, options).is_ok());

    let mut long = b"32:".to_vec();
    long.extend([b'x'; 32]);
    let err = decode_with(&long, options).unwrap_err();
    assert!(matches!(
        err,
        BencodeError::StringTooLong {
            len: 32,
            max: 31,
            offset: 0
        }
    ));
}

#[test]
fn test_entry_count_limit() {
    let options = DecodeOptions::default().with_profile(WidthProfile::Narrow);
    let full = int_list(63);
    let doc = decode_with(&full, options).unwrap();
    assert_eq!(doc.count(root_of(&doc)), Some(63));

    let over = int_list(64);
    assert!(matches!(
        decode_with(&over, options),
        Err(BencodeError::TooManyEntries { max: 63, offset: 0 })
    ));
}

#[test]
fn test_compact_profile_limits() {
    let options = DecodeOptions::default().with_profile(WidthProfile::Compact);

    let ok = long_string(8191);
    let doc = decode_with(&ok, options).unwrap();
    assert_eq!(doc.node(root_of(&doc)).unwrap().len(), 8191);

    let long = long_string(8192);
    assert!(matches!(
        decode_with(&long, options),
        Err(BencodeError::StringTooLong {
            len: 8192,
            max: 8191,
            offset: 0
        })
    ));

    let full = int_list(16383);
    let doc = decode_with(&full, options).unwrap();
    assert_eq!(doc.count(root_of(&doc)), Some(16383));
    assert_eq!(doc.pool().profile(), WidthProfile::Compact);

    let over = int_list(16384);
    assert!(matches!(
        decode_with(&over, options),
        Err(BencodeError::TooManyEntries {
            max: 16383,
            offset: 0
        })
    ));
}

#[test]
fn test_input_length_limit() {
    let options = DecodeOptions::default().with_profile(WidthProfile::Narrow);
    let mut data = b"300:".to_vec();
    data.extend([b'x'; 300]);
    assert!(matches!(
        decode_with(&data, options),
        Err(BencodeError::InputTooLarge { len: 304, max: 255 })
    ));
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(decode(b"i42eextra"), Err(BencodeError::TrailingData(4))));
    assert!(matches!(decode(b"4:spam:"), Err(BencodeError::TrailingData(6))));
    assert!(matches!(
        decode(b"xi42e"),
        Err(BencodeError::UnexpectedChar { byte: 'x', offset: 0 })
    ));
    assert!(matches!(decode(b""), Err(BencodeError::EmptyInput)));
    assert!(matches!(decode(b"l4:spam"), Err(BencodeError::UnexpectedEof(7))));
}

#[test]
fn test_multiple_top_level_values_root_is_last() {
    let doc = decode(b"i1ei2e").unwrap();
    let root = root_of(&doc);
    assert_eq!(doc.as_bytes(root), Some(b"2".as_slice()));
    assert_eq!(root.index(), 1);
}

#[test]
fn test_root_is_last_node() {
    let doc = decode(b"d4:listl4:spami42eee").unwrap();
    assert_eq!(root_of(&doc).index() as u32 + 1, doc.pool().len());
}

#[test]
fn test_fixed_pool_exhaustion_aborts_decode() {
    let mut slots = [Slot::EMPTY; 4];
    let pool = Pool::fixed(&mut slots);
    let err = Document::decode_into(b"l1:a1:b1:c1:de", pool, DecodeOptions::default())
        .unwrap_err();
    assert!(matches!(err, BencodeError::OutOfCapacity { capacity: 4 }));
    assert!(err.is_allocation());

    let mut slots = [Slot::EMPTY; 5];
    let pool = Pool::fixed(&mut slots);
    let doc = Document::decode_into(b"l1:a1:b1:c1:de", pool, DecodeOptions::default()).unwrap();
    assert_eq!(doc.count(root_of(&doc)), Some(4));
}

#[test]
fn test_roundtrip() {
    let inputs: [&[u8]; 8] = [
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee",
        b"d4:spam4:eggs3:cow3:mooe",
        b"d4:listl4:spami42eee",
        b"l4:spam4:eggse",
        b"d1:ai1e1:ai2ee",
        b"i-0e",
        b"0:",
        b"lli-3eedelee",
    ];
    for input in inputs {
        let doc = decode(input).unwrap();
        let root = root_of(&doc);
        assert_eq!(encode(&doc, root, Format::Bencode).unwrap(), input);
        assert_eq!(
            encoded_len(&doc, root, Format::Bencode).unwrap(),
            input.len()
        );
    }
}

#[test]
fn test_query() {
    let doc = decode(b"d4:name3:bobe").unwrap();
    let name = doc.get("name").unwrap();
    assert_eq!(doc.as_str(name), Some("bob"));

    let err = doc.get("missing").unwrap_err();
    assert!(matches!(err, BencodeError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_query_nested() {
    let doc = decode(b"d9:publisherd8:locationd4:city6:Londonee5:itemsl1:a1:b1:cee").unwrap();
    let city = doc.get("publisher.location.city").unwrap();
    assert_eq!(doc.as_str(city), Some("London"));

    let item = doc.get("items[2]").unwrap();
    assert_eq!(doc.as_str(item), Some("c"));

    let publisher = doc.get("publisher").unwrap();
    let location = doc.query(publisher, "location").unwrap();
    assert_eq!(doc.count(location), Some(2));
}

#[test]
fn test_query_misses() {
    let doc = decode(b"d4:name3:bob5:itemsl1:aee").unwrap();
    for path in ["items[1]", "name[0]", "items.a", "name.first", "nam"] {
        assert_eq!(
            doc.get(path).unwrap_err().kind(),
            ErrorKind::NotFound,
            "{path}"
        );
    }
    assert_eq!(
        doc.get("items[").unwrap_err().kind(),
        ErrorKind::QueryMalformed
    );
    assert_eq!(doc.get("").unwrap_err().kind(), ErrorKind::QueryMalformed);
}

#[test]
fn test_query_index_from_list_root() {
    let doc = decode(b"ld4:name3:fooed4:name3:baree").unwrap();
    let name = doc.get("[1].name").unwrap();
    assert_eq!(doc.as_str(name), Some("bar"));
}

#[test]
fn test_update_in_place() {
    let input = b"d9:publisher3:bob17:publisher-webpage15:www.example.com18:publisher.location4:homee";
    let mut doc = decode(input).unwrap();
    let root = root_of(&doc);

    let webpage = doc.get("publisher-webpage").unwrap();
    let replacement = doc.new_string(b"mywebpage").unwrap();
    doc.update(webpage, replacement).unwrap();

    assert_eq!(
        encode(&doc, root, Format::Bencode).unwrap(),
        b"d9:publisher3:bob17:publisher-webpage9:mywebpage18:publisher.location4:homee".to_vec()
    );
    let updated = doc.get("publisher-webpage").unwrap();
    assert_eq!(updated, webpage);
    assert!(doc.node(updated).unwrap().byte_ref().unwrap().is_owned());
    assert_eq!(doc.count(root), Some(6));
}

#[test]
fn test_update_with_container() {
    let mut doc = decode(b"d1:a1:x1:bi2ee").unwrap();
    let root = root_of(&doc);
    let y = doc.new_string(b"y").unwrap();
    let list = doc.new_list(&[y]).unwrap();

    let a = doc.get("a").unwrap();
    doc.update(a, list).unwrap();
    assert_eq!(doc.to_vec(root, Format::Bencode).unwrap(), b"d1:al1:ye1:bi2ee");
    assert_eq!(doc.get("a[0]").map(|r| doc.as_str(r)).unwrap(), Some("y"));
}

#[test]
fn test_build_from_scratch() {
    let mut doc = Document::new(Pool::growable(4).unwrap());
    assert_eq!(doc.root(), None);

    let cow = doc.new_string(b"cow").unwrap();
    let moo = doc.new_string(b"moo").unwrap();
    let spam = doc.new_string(b"spam").unwrap();
    let a = doc.new_string(b"a").unwrap();
    let n = doc.new_number(-12).unwrap();
    let list = doc.new_list(&[a, n]).unwrap();
    let dict = doc.new_dict(&[(cow, moo), (spam, list)]).unwrap();
    doc.set_root(dict).unwrap();

    assert_eq!(
        doc.to_vec(dict, Format::Bencode).unwrap(),
        b"d3:cow3:moo4:spaml1:ai-12eee"
    );
    assert_eq!(doc.count(dict), Some(4));
    let second = doc.get("spam[1]").unwrap();
    assert_eq!(doc.as_bytes(second), Some(b"-12".as_slice()));

    let empty = doc.new_dict(&[]).unwrap();
    assert_eq!(doc.to_vec(empty, Format::Bencode).unwrap(), b"de");
}

#[test]
fn test_append_to_decoded_containers() {
    let mut doc = decode(b"d3:cow3:mooe").unwrap();
    let root = root_of(&doc);
    let key = doc.new_string(b"spam").unwrap();
    let value = doc.new_string(b"eggs").unwrap();
    doc.dict_insert(root, key, value).unwrap();

    assert_eq!(doc.count(root), Some(4));
    assert_eq!(
        doc.to_vec(root, Format::Bencode).unwrap(),
        b"d3:cow3:moo4:spam4:eggse"
    );
    let eggs = doc.get("spam").unwrap();
    assert_eq!(doc.as_str(eggs), Some("eggs"));

    let mut doc = decode(b"le").unwrap();
    let root = root_of(&doc);
    let five = doc.new_number(5).unwrap();
    doc.list_push(root, five).unwrap();
    let six = doc.new_number(6).unwrap();
    doc.list_push(root, six).unwrap();
    assert_eq!(doc.to_vec(root, Format::Bencode).unwrap(), b"li5ei6ee");
    assert_eq!(doc.count(root), Some(2));
}

#[test]
fn test_construction_type_errors() {
    let mut doc = Document::new(Pool::growable(8).unwrap());
    let one = doc.new_number(1).unwrap();
    let x = doc.new_string(b"x").unwrap();

    let err = doc.new_dict(&[(one, x)]).unwrap_err();
    assert!(matches!(
        err,
        BencodeError::TypeMismatch {
            expected: "string",
            found: "number"
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    let dict = doc.new_dict(&[]).unwrap();
    assert!(matches!(
        doc.list_push(dict, x),
        Err(BencodeError::TypeMismatch {
            expected: "list",
            found: "dictionary"
        })
    ));

    let missing = NodeRef(999);
    assert!(matches!(
        doc.update(missing, x),
        Err(BencodeError::InvalidNodeRef(r)) if r == missing
    ));
    assert!(doc.new_list(&[x, missing]).is_err());
    assert!(matches!(
        doc.new_number(i64::MIN),
        Err(BencodeError::ValueTooLong { len: 20, max: 19 })
    ));
}

#[test]
fn test_construction_limits() {
    let mut slots = [Slot::EMPTY; 2];
    let mut doc = Document::new(Pool::fixed(&mut slots));
    doc.new_string(b"abc").unwrap();
    assert_eq!(
        doc.new_number(1).unwrap_err().kind(),
        ErrorKind::OutOfCapacity
    );

    let mut doc = Document::new(
        Pool::growable(4)
            .unwrap()
            .with_profile(WidthProfile::Narrow)
            .unwrap(),
    );
    assert!(matches!(
        doc.new_string(&[b'x'; 32]),
        Err(BencodeError::ValueTooLong { len: 32, max: 31 })
    ));
    let item = doc.new_number(0).unwrap();
    let items = vec![item; 64];
    assert!(matches!(
        doc.new_list(&items),
        Err(BencodeError::EntryLimit { max: 63 })
    ));
}

#[test]
fn test_construction_refuses_linked_nodes() {
    let mut doc = Document::new(Pool::growable(8).unwrap());
    let a = doc.new_string(b"a").unwrap();
    assert!(matches!(
        doc.new_list(&[a, a]),
        Err(BencodeError::AlreadyLinked(r)) if r == a
    ));

    let list = doc.new_list(&[a]).unwrap();
    assert_eq!(doc.count(list), Some(1));
    assert!(matches!(
        doc.new_list(&[a]),
        Err(BencodeError::AlreadyLinked(r)) if r == a
    ));
    assert!(matches!(
        doc.list_push(list, list),
        Err(BencodeError::CyclicLink(r)) if r == list
    ));

    let outer = doc.new_list(&[list]).unwrap();
    let err = doc.list_push(list, outer).unwrap_err();
    assert!(matches!(err, BencodeError::CyclicLink(r) if r == outer));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(doc.to_vec(outer, Format::Bencode).unwrap(), b"ll1:aee");
}

#[test]
fn test_decoded_parent_survives_refused_relink() {
    let mut doc = decode(b"d1:a1:x1:b1:ye").unwrap();
    let root = root_of(&doc);
    let x = doc.get("a").unwrap();
    let y = doc.get("b").unwrap();
    let first_key = doc.children(root).next().unwrap();

    assert!(matches!(
        doc.new_list(&[x]),
        Err(BencodeError::AlreadyLinked(r)) if r == x
    ));
    assert!(matches!(
        doc.new_dict(&[(first_key, y)]),
        Err(BencodeError::AlreadyLinked(_))
    ));
    let z = doc.new_string(b"z").unwrap();
    assert!(matches!(
        doc.dict_insert(root, z, y),
        Err(BencodeError::AlreadyLinked(r)) if r == y
    ));

    assert_eq!(doc.count(root), Some(4));
    assert_eq!(doc.as_str(doc.get("b").unwrap()), Some("y"));
    assert_eq!(doc.to_vec(root, Format::Bencode).unwrap(), b"d1:a1:x1:b1:ye");

    let wrapper = doc.new_list(&[z]).unwrap();
    assert!(matches!(
        doc.update(z, wrapper),
        Err(BencodeError::CyclicLink(r)) if r == wrapper
    ));
    doc.update(x, wrapper).unwrap();
    assert_eq!(doc.to_vec(root, Format::Bencode).unwrap(), b"d1:al1:ze1:b1:ye");
}

#[test]
fn test_pool_reclaimed_from_document() {
    let data = b"l4:spami1ee";
    let doc = decode(data).unwrap();
    assert_eq!(doc.input(), data.as_slice());

    let root = root_of(&doc);
    let first = doc.list_get(root, 0).unwrap();
    assert!(doc.node(first).unwrap().is_string());
    assert!(!doc.node(root).unwrap().is_string());

    let pool = doc.into_pool();
    assert_eq!(pool.len(), 3);
    let err = pool.with_profile(WidthProfile::Narrow).unwrap_err();
    assert!(matches!(err, BencodeError::PoolInUse { used: 3 }));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}

#[test]
fn test_encode_json() {
    let doc = decode(b"d3:cow3:moo4:spaml1:ai-3eee").unwrap();
    let root = root_of(&doc);
    assert_eq!(
        encode(&doc, root, Format::Json).unwrap(),
        br#"{"cow":"moo","spam":["a",-3]}"#.to_vec()
    );
    assert_eq!(
        String::from_utf8(encode(&doc, root, Format::JsonPretty).unwrap()).unwrap(),
        "{\n  \"cow\": \"moo\",\n  \"spam\": [\n    \"a\",\n    -3\n  ]\n}"
    );

    let doc = decode(b"ldelee").unwrap();
    let root = root_of(&doc);
    assert_eq!(encode(&doc, root, Format::Json).unwrap(), b"[{},[]]");
    assert_eq!(
        encode(&doc, root, Format::JsonPretty).unwrap(),
        b"[\n  {},\n  []\n]"
    );
}

#[test]
fn test_encode_json_escapes() {
    let mut doc = Document::new(Pool::growable(4).unwrap());
    let s = doc.new_string(b"a\"b\\\n\x01").unwrap();
    assert_eq!(
        encode(&doc, s, Format::Json).unwrap(),
        br#""a\"b\\\n\u0001""#.to_vec()
    );
}

#[test]
fn test_encode_measure_then_write() {
    let doc = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
    let root = root_of(&doc);
    for format in [Format::Bencode, Format::Json, Format::JsonPretty] {
        let full = encode(&doc, root, format).unwrap();
        let needed = encoded_len(&doc, root, format).unwrap();
        assert_eq!(needed, full.len());

        let mut short = vec![0u8; needed / 2];
        assert_eq!(encode_into(&doc, root, format, &mut short).unwrap(), needed);
        assert_eq!(short, full[..needed / 2]);

        let mut exact = vec![0u8; needed];
        assert_eq!(encode_into(&doc, root, format, &mut exact).unwrap(), needed);
        assert_eq!(exact, full);
    }
}

#[test]
fn test_value_accessors() {
    let doc = decode(b"l4:testi42ee").unwrap();
    let root = root_of(&doc);
    let s = doc.list_get(root, 0).unwrap();
    let n = doc.list_get(root, 1).unwrap();
    assert_eq!(doc.list_get(root, 2), None);

    assert_eq!(doc.as_str(s), Some("test"));
    assert_eq!(doc.count(s), None);
    assert_eq!(doc.as_str(n), None);
    assert_eq!(doc.as_bytes(n), Some(b"42".as_slice()));
    assert_eq!(doc.as_bytes(root), None);
    assert_eq!(doc.count(root), Some(2));
    assert_eq!(doc.next(s), Some(n));
    assert_eq!(doc.next(n), None);
}

#[test]
fn test_error_kinds() {
    assert_eq!(BencodeError::EmptyInput.kind(), ErrorKind::MalformedInput);
    assert_eq!(
        BencodeError::OutOfMemory { capacity: 1 }.kind(),
        ErrorKind::OutOfMemory
    );
    assert_eq!(
        BencodeError::QueryMalformed("x".into()).kind(),
        ErrorKind::QueryMalformed
    );
    assert!(!BencodeError::NotFound("x".into()).is_allocation());
}
