//! Shared fixtures: a synthetic `emoji-test.txt` with the same shape and
//! size as the Emoji 12.1 file.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use covert_chess::alphabet::Alphabet;

/// Number of fully-qualified records, as in Emoji 12.1.
pub const ALPHABET_LEN: usize = 3178;

/// Records in U+2600..U+26FF are written fully qualified (with U+FE0F) and
/// followed by an unqualified variant.
pub const LOOSE_LEN: usize = 0x100;

const MODIFIERS: std::ops::RangeInclusive<u32> = 0x1F3FB..=0x1F3FF;

fn digits() -> Vec<(Vec<u32>, Option<Vec<u32>>)> {
    let mut digits = Vec::new();
    for cp in 0x2600..=0x26FF {
        digits.push((vec![cp, 0xFE0F], Some(vec![cp])));
    }
    for range in [
        0x1F300..=0x1F3FA,
        0x1F400..=0x1F5FF,
        0x1F600..=0x1F64F,
        0x1F680..=0x1F6FF,
        0x1F900..=0x1F9FF,
    ] {
        for cp in range {
            digits.push((vec![cp], None));
        }
    }
    for range in [0x1F600..=0x1F64F, 0x1F900..=0x1F9FF, 0x1F680..=0x1F6FF] {
        for cp in range {
            for modifier in MODIFIERS {
                digits.push((vec![cp, modifier], None));
            }
        }
    }
    digits.truncate(ALPHABET_LEN);
    digits
}

fn record(out: &mut String, points: &[u32], status: &str, name: &str) {
    let hex: Vec<String> = points.iter().map(|p| format!("{p:04X}")).collect();
    let rendered: String = points.iter().filter_map(|&p| char::from_u32(p)).collect();
    let _ = writeln!(out, "{:<40} ; {status:<20} # {rendered} E0.6 {name}", hex.join(" "));
}

/// Text of the synthetic emoji-test file.
pub fn emoji_test_source() -> String {
    let mut out = String::from(
        "# emoji-test.txt (synthetic fixture)\n\
         # Format: code points; status # emoji name\n\n",
    );

    out.push_str("# group: Component\n# subgroup: skin-tone\n");
    for modifier in MODIFIERS {
        record(&mut out, &[modifier], "component", "skin tone");
    }
    out.push('\n');

    for (i, (points, loose)) in digits().iter().enumerate() {
        if i % 1000 == 0 {
            let _ = writeln!(out, "\n# group: Block {}", i / 1000);
        }
        if i % 100 == 0 {
            let _ = writeln!(out, "# subgroup: run-{}", i / 100);
        }
        let name = format!("symbol {i}");
        record(&mut out, points, "fully-qualified", &name);
        if let Some(loose) = loose {
            record(&mut out, loose, "unqualified", &name);
        }
    }

    out.push_str("\n#EOF\n");
    out
}

pub fn alphabet() -> Alphabet {
    Alphabet::parse(&emoji_test_source()).expect("synthetic fixture parses")
}

/// Write the fixture to `dir/emoji-test.txt`.
pub fn write_emoji_test(dir: &Path) -> PathBuf {
    let path = dir.join("emoji-test.txt");
    std::fs::write(&path, emoji_test_source()).expect("write fixture");
    path
}

pub const MESSAGE: &str = "Meet me by the old oak tree after the market closes on Friday, \
     and bring the blue notebook we talked about last week. If it rains we can \
     move to the cafe on the corner instead.";
