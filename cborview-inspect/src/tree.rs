//! Decode CBOR into a JSON tree annotated with byte ranges
//!
//! Every node records where its bytes sit in the original payload:
//! `position_info` covers the head token (the part that names the value),
//! and collections additionally carry `struct_position_info` spanning the
//! whole structure including nested items. Offsets are captured from the
//! decoder cursor around each item, so they are exact for any input the
//! decoder accepts.

use minicbor::data::{Tag, Type};
use minicbor::decode::{Decode, Decoder};
use serde_json::{Map, Number, Value};

use crate::Error;

/// Byte range of a decoded item within the inspected payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Span {
            offset: start,
            length: end - start,
        }
    }

    fn to_json(self) -> Value {
        let mut obj = Map::new();
        obj.insert("offset".into(), self.offset.into());
        obj.insert("length".into(), self.length.into());
        Value::Object(obj)
    }
}

/// Decode a full CBOR payload into annotated JSON
///
/// Payloads holding several top-level items (a CBOR sequence) produce one
/// entry per item; the result is always an array.
pub fn inspect(bytes: &[u8]) -> Result<Value, Error> {
    let mut d = Decoder::new(bytes);
    let mut items = Vec::new();

    while d.position() < bytes.len() {
        let Node(item) = d.decode()?;
        items.push(item);
    }

    Ok(Value::Array(items))
}

/// [inspect] over a hex payload
pub fn inspect_hex(payload: &str) -> Result<Value, Error> {
    inspect(&hex::decode(payload)?)
}

/// [inspect] over pasted text, auto-detecting hex vs base64
pub fn inspect_text(text: &str) -> Result<Value, Error> {
    inspect(&crate::input::normalize(text)?)
}

struct Node(Value);

impl<'b, C> Decode<'b, C> for Node {
    fn decode(d: &mut Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        decode_node(d, ctx).map(Node)
    }
}

/// Size in bytes of the head token starting with `initial`, derived from
/// the additional-information bits (RFC 8949 §3).
fn head_len(initial: u8) -> usize {
    match initial & 0x1f {
        24 => 2,
        25 => 3,
        26 => 5,
        27 => 9,
        _ => 1,
    }
}

fn decode_node<'b, C>(
    d: &mut Decoder<'b>,
    ctx: &mut C,
) -> Result<Value, minicbor::decode::Error> {
    let input = d.input();
    let start = d.position();
    let initial = *input
        .get(start)
        .ok_or_else(|| minicbor::decode::Error::message("unexpected end of input"))?;
    let head = Span::new(start, start + head_len(initial));

    match d.datatype()? {
        Type::Array | Type::ArrayIndef => {
            let len = peek_len(d)?;

            let values: Result<Vec<Node>, _> = d.array_iter_with::<C, Node>(ctx)?.collect();
            let values = values?.into_iter().map(|Node(v)| v).collect();
            let end = d.position();

            Ok(collection_node("array", len, head, Span::new(start, end), values))
        }
        Type::Map | Type::MapIndef => {
            let len = peek_len(d)?;

            let entries: Result<Vec<(Node, Node)>, _> =
                d.map_iter_with::<C, Node, Node>(ctx)?.collect();
            let values = entries?
                .into_iter()
                .map(|(Node(key), Node(value))| {
                    let mut entry = Map::new();
                    entry.insert("key".into(), key);
                    entry.insert("value".into(), value);
                    Value::Object(entry)
                })
                .collect();
            let end = d.position();

            Ok(collection_node("map", len, head, Span::new(start, end), values))
        }
        Type::Tag => {
            let tag = d.tag()?;
            let value = decode_node(d, ctx)?;
            let end = d.position();

            let mut obj = Map::new();
            obj.insert("type".into(), "tag".into());
            obj.insert("position_info".into(), head.to_json());
            obj.insert("struct_position_info".into(), Span::new(start, end).to_json());
            obj.insert("tag".into(), tag_name(tag).into());
            obj.insert("value".into(), value);
            Ok(Value::Object(obj))
        }
        Type::Bool => scalar(d, start, "Bool", |d| Ok(d.bool()?.into())),
        Type::Null => scalar(d, start, "Null", |d| d.null().map(|_| Value::Null)),
        Type::Undefined => scalar(d, start, "Undefined", |d| d.undefined().map(|_| Value::Null)),
        Type::U8 => scalar(d, start, "U8", |d| Ok(d.u8()?.into())),
        Type::U16 => scalar(d, start, "U16", |d| Ok(d.u16()?.into())),
        Type::U32 => scalar(d, start, "U32", |d| Ok(d.u32()?.into())),
        Type::U64 => scalar(d, start, "U64", |d| Ok(d.u64()?.into())),
        Type::I8 => scalar(d, start, "I8", |d| Ok(d.i8()?.into())),
        Type::I16 => scalar(d, start, "I16", |d| Ok(d.i16()?.into())),
        Type::I32 => scalar(d, start, "I32", |d| Ok(d.i32()?.into())),
        Type::I64 => scalar(d, start, "I64", |d| Ok(d.i64()?.into())),
        Type::Int => scalar(d, start, "Int", |d| Ok(int_to_json(d.int()?))),
        Type::F16 => scalar(d, start, "F16", |d| Ok(float_to_json(d.f16()? as f64))),
        Type::F32 => scalar(d, start, "F32", |d| Ok(float_to_json(d.f32()? as f64))),
        Type::F64 => scalar(d, start, "F64", |d| Ok(float_to_json(d.f64()?))),
        Type::Simple => scalar(d, start, "Simple", |d| Ok(d.simple()?.into())),
        Type::Bytes => scalar(d, start, "Bytes", |d| Ok(hex::encode(d.bytes()?).into())),
        Type::BytesIndef => scalar(d, start, "Bytes", |d| {
            let mut full = Vec::new();
            for chunk in d.bytes_iter()? {
                full.extend_from_slice(chunk?);
            }
            Ok(hex::encode(full).into())
        }),
        Type::String => scalar(d, start, "String", |d| Ok(d.str()?.into())),
        Type::StringIndef => scalar(d, start, "String", |d| {
            let mut full = String::new();
            for chunk in d.str_iter()? {
                full.push_str(chunk?);
            }
            Ok(full.into())
        }),
        other => Err(minicbor::decode::Error::message(format!(
            "unsupported cbor data type {other:?}"
        ))),
    }
}

/// Definite-length count of the collection the decoder sits on, without
/// moving the cursor
fn peek_len(d: &mut Decoder) -> Result<Option<u64>, minicbor::decode::Error> {
    let mut probe = d.probe();

    match probe.datatype()? {
        Type::Array => probe.array(),
        Type::Map => probe.map(),
        _ => Ok(None),
    }
}

fn collection_node(
    kind: &str,
    len: Option<u64>,
    head: Span,
    full: Span,
    values: Vec<Value>,
) -> Value {
    let items = match len {
        Some(len) => Value::Number(len.into()),
        None => Value::String("Indefinite".into()),
    };

    let mut obj = Map::new();
    obj.insert("type".into(), kind.into());
    obj.insert("items".into(), items);
    obj.insert("position_info".into(), head.to_json());
    obj.insert("struct_position_info".into(), full.to_json());
    obj.insert("values".into(), Value::Array(values));
    Value::Object(obj)
}

fn scalar<'b, F>(
    d: &mut Decoder<'b>,
    start: usize,
    name: &str,
    read: F,
) -> Result<Value, minicbor::decode::Error>
where
    F: FnOnce(&mut Decoder<'b>) -> Result<Value, minicbor::decode::Error>,
{
    let value = read(d)?;
    let end = d.position();

    let mut obj = Map::new();
    obj.insert("position_info".into(), Span::new(start, end).to_json());
    obj.insert("type".into(), name.into());
    obj.insert("value".into(), value);
    Ok(Value::Object(obj))
}

fn int_to_json(int: minicbor::data::Int) -> Value {
    let wide = i128::from(int);

    if let Ok(narrow) = i64::try_from(wide) {
        Value::Number(narrow.into())
    } else if let Ok(narrow) = u64::try_from(wide) {
        Value::Number(narrow.into())
    } else {
        Value::String(wide.to_string())
    }
}

fn float_to_json(float: f64) -> Value {
    match Number::from_f64(float) {
        Some(number) => Value::Number(number),
        None => Value::String(float.to_string()),
    }
}

fn tag_name(tag: Tag) -> String {
    match tag {
        Tag::DateTime => "DateTime".into(),
        Tag::Timestamp => "Timestamp".into(),
        Tag::PosBignum => "PosBignum".into(),
        Tag::NegBignum => "NegBignum".into(),
        Tag::Decimal => "Decimal".into(),
        Tag::Bigfloat => "Bigfloat".into(),
        Tag::ToBase64Url => "ToBase64Url".into(),
        Tag::ToBase64 => "ToBase64".into(),
        Tag::ToBase16 => "ToBase16".into(),
        Tag::Cbor => "Cbor".into(),
        Tag::Uri => "Uri".into(),
        Tag::Base64Url => "Base64Url".into(),
        Tag::Base64 => "Base64".into(),
        Tag::Regex => "Regex".into(),
        Tag::Mime => "Mime".into(),
        Tag::Unassigned(other) => format!("Unassigned({other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn single(payload: &str) -> Value {
        let decoded = inspect_hex(payload).unwrap();
        decoded.as_array().unwrap()[0].clone()
    }

    #[test]
    fn scalars_carry_their_byte_range() {
        let node = single("1861");

        assert_eq!(
            node,
            json!({
                "position_info": {"offset": 0, "length": 2},
                "type": "U8",
                "value": 97,
            })
        );
    }

    #[test]
    fn arrays_report_head_and_full_spans() {
        let node = single("83010218ff");

        assert_eq!(node["type"], "array");
        assert_eq!(node["items"], 3);
        assert_eq!(node["position_info"], json!({"offset": 0, "length": 1}));
        assert_eq!(
            node["struct_position_info"],
            json!({"offset": 0, "length": 5})
        );

        let values = node["values"].as_array().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[2]["position_info"], json!({"offset": 3, "length": 2}));
    }

    #[test]
    fn maps_pair_keys_with_values() {
        let node = single("a26161016162820203");

        assert_eq!(node["type"], "map");
        assert_eq!(node["items"], 2);

        let entries = node["values"].as_array().unwrap();
        assert_eq!(entries[0]["key"]["value"], "a");
        assert_eq!(entries[0]["value"]["value"], 1);
        assert_eq!(entries[1]["key"]["value"], "b");
        assert_eq!(entries[1]["value"]["type"], "array");
    }

    #[test]
    fn indefinite_collections_are_flagged() {
        let node = single("9f0102ff");

        assert_eq!(node["items"], "Indefinite");
        assert_eq!(node["values"].as_array().unwrap().len(), 2);
        assert_eq!(
            node["struct_position_info"],
            json!({"offset": 0, "length": 4})
        );
    }

    #[test]
    fn tags_are_named_and_span_their_content() {
        let node = single("c249010000000000000000");

        assert_eq!(node["type"], "tag");
        assert_eq!(node["tag"], "PosBignum");
        assert_eq!(node["position_info"], json!({"offset": 0, "length": 1}));
        assert_eq!(
            node["struct_position_info"],
            json!({"offset": 0, "length": 11})
        );
        assert_eq!(node["value"]["type"], "Bytes");
        assert_eq!(node["value"]["value"], "010000000000000000");
    }

    #[test]
    fn byte_strings_render_as_lowercase_hex() {
        let node = single("44deadbeef");

        assert_eq!(node["value"], "deadbeef");
        assert_eq!(node["position_info"], json!({"offset": 0, "length": 5}));
    }

    #[test]
    fn multi_byte_heads_are_measured() {
        // 2-byte head: bytes(24)
        let payload = format!("5818{}", "ab".repeat(24));
        let node = single(&payload);

        assert_eq!(node["position_info"], json!({"offset": 0, "length": 26}));
    }

    #[test]
    fn cbor_sequences_yield_one_node_per_item() {
        let decoded = inspect_hex("0102").unwrap();

        assert_eq!(decoded.as_array().unwrap().len(), 2);
    }

    #[test]
    fn nested_offsets_are_absolute() {
        let node = single("818183010203");

        let inner = &node["values"][0]["values"][0];
        assert_eq!(inner["type"], "array");
        assert_eq!(inner["position_info"], json!({"offset": 2, "length": 1}));
        assert_eq!(
            inner["struct_position_info"],
            json!({"offset": 2, "length": 4})
        );
    }

    #[test]
    fn truncated_payloads_error() {
        assert!(inspect_hex("8301").is_err());
        assert!(inspect_hex("zz").is_err());
    }
}
