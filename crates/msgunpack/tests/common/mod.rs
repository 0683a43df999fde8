//! Reference MessagePack encoder used only by the test suite. Always picks
//! the smallest encoding for a value.

#![allow(dead_code)]

use msgunpack::{Integer, Value};

pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_any(&mut out, value);
    out
}

fn write_any(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Nil => out.push(0xc0),
        Value::Bool(b) => out.push(if *b { 0xc3 } else { 0xc2 }),
        Value::Integer(n) => write_int(out, *n),
        Value::F32(f) => {
            out.push(0xca);
            out.extend_from_slice(&f.to_be_bytes());
        }
        Value::F64(f) => {
            out.push(0xcb);
            out.extend_from_slice(&f.to_be_bytes());
        }
        Value::String(s) => {
            let n = s.len();
            if n < 32 {
                out.push(0xa0 | n as u8);
            } else {
                write_len(out, n, [0xd9, 0xda, 0xdb]);
            }
            out.extend_from_slice(s.as_bytes());
        }
        Value::Binary(b) => {
            write_len(out, b.len(), [0xc4, 0xc5, 0xc6]);
            out.extend_from_slice(b);
        }
        Value::Array(items) => {
            let n = items.len();
            if n < 16 {
                out.push(0x90 | n as u8);
            } else {
                write_len16(out, n, [0xdc, 0xdd]);
            }
            for item in items {
                write_any(out, item);
            }
        }
        Value::Map(pairs) => {
            let n = pairs.len();
            if n < 16 {
                out.push(0x80 | n as u8);
            } else {
                write_len16(out, n, [0xde, 0xdf]);
            }
            for (k, v) in pairs {
                write_any(out, k);
                write_any(out, v);
            }
        }
        Value::Extension(ext) => {
            match ext.data.len() {
                1 => out.push(0xd4),
                2 => out.push(0xd5),
                4 => out.push(0xd6),
                8 => out.push(0xd7),
                16 => out.push(0xd8),
                n => write_len(out, n, [0xc7, 0xc8, 0xc9]),
            }
            out.push(ext.tag);
            out.extend_from_slice(&ext.data);
        }
    }
}

fn write_int(out: &mut Vec<u8>, n: Integer) {
    if let Some(u) = n.as_u64() {
        if u <= 0x7f {
            out.push(u as u8);
        } else if u <= 0xff {
            out.extend_from_slice(&[0xcc, u as u8]);
        } else if u <= 0xffff {
            out.push(0xcd);
            out.extend_from_slice(&(u as u16).to_be_bytes());
        } else if u <= 0xffff_ffff {
            out.push(0xce);
            out.extend_from_slice(&(u as u32).to_be_bytes());
        } else {
            out.push(0xcf);
            out.extend_from_slice(&u.to_be_bytes());
        }
        return;
    }
    let i = n.as_i64().expect("negative integers fit in i64");
    if i >= -32 {
        out.push(i as i8 as u8);
    } else if i >= i64::from(i8::MIN) {
        out.extend_from_slice(&[0xd0, i as i8 as u8]);
    } else if i >= i64::from(i16::MIN) {
        out.push(0xd1);
        out.extend_from_slice(&(i as i16).to_be_bytes());
    } else if i >= i64::from(i32::MIN) {
        out.push(0xd2);
        out.extend_from_slice(&(i as i32).to_be_bytes());
    } else {
        out.push(0xd3);
        out.extend_from_slice(&i.to_be_bytes());
    }
}

/// 8/16/32-bit length prefix.
fn write_len(out: &mut Vec<u8>, n: usize, tags: [u8; 3]) {
    if n <= 0xff {
        out.extend_from_slice(&[tags[0], n as u8]);
    } else if n <= 0xffff {
        out.push(tags[1]);
        out.extend_from_slice(&(n as u16).to_be_bytes());
    } else {
        out.push(tags[2]);
        out.extend_from_slice(&(n as u32).to_be_bytes());
    }
}

/// 16/32-bit length prefix.
fn write_len16(out: &mut Vec<u8>, n: usize, tags: [u8; 2]) {
    if n <= 0xffff {
        out.push(tags[0]);
        out.extend_from_slice(&(n as u16).to_be_bytes());
    } else {
        out.push(tags[1]);
        out.extend_from_slice(&(n as u32).to_be_bytes());
    }
}
