//! Shape metrics over arbitrary JSON.
//!
//! Metrics must not panic, must agree between `serde_json::Value` and the
//! owned `Node`, and must keep the collection rules.

#![no_main]

use libfuzzer_sys::fuzz_target;
use xlr8_shape::{Node, Shape, depth, length};

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(s) else {
        return;
    };

    let shape = Shape::of(&value);
    assert_eq!(shape, Shape::of(&value));

    let node = Node::from(value.clone());
    assert_eq!(Shape::of(&node), shape);

    let wrapped = vec![value.clone(), value];
    assert_eq!(depth(&wrapped), shape.depth);
    assert_eq!(length(&wrapped), shape.length.saturating_mul(2));
});
