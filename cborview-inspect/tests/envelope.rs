use cborview_inspect::tree::inspect_hex;
use cborview_scriptref::{bytestring, wrap_script_ref_hex};

// the adapted envelope has to be decodable CBOR, otherwise the viewer
// can't cross-highlight reference scripts fetched from the indexer
#[test]
fn wrapped_reference_scripts_decode_as_tagged_pairs() {
    let payload = bytestring::encode_hex("4d01000033222220051200120011").unwrap();
    let envelope = wrap_script_ref_hex(&payload, Some("plutusV2")).unwrap();

    let decoded = inspect_hex(&envelope).unwrap();
    let node = &decoded.as_array().unwrap()[0];

    assert_eq!(node["type"], "array");
    assert_eq!(node["items"], 2);

    let values = node["values"].as_array().unwrap();
    assert_eq!(values[0]["value"], 2);
    assert_eq!(values[1]["value"], "4d01000033222220051200120011");
}

#[test]
fn envelope_byte_ranges_line_up_with_the_hex_view() {
    // invalid-hereafter native script: [5, 30]
    let envelope = wrap_script_ref_hex("8205181e", Some("native")).unwrap();
    assert_eq!(envelope, "82008205181e");

    let decoded = inspect_hex(&envelope).unwrap();
    let node = &decoded.as_array().unwrap()[0];

    // tag byte sits right after the array head
    assert_eq!(
        node["values"][0]["position_info"],
        serde_json::json!({"offset": 1, "length": 1})
    );
    // native script payload spans the rest
    assert_eq!(
        node["values"][1]["struct_position_info"],
        serde_json::json!({"offset": 2, "length": 4})
    );
}
