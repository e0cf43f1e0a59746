use crate::Instance;
use anyhow::{anyhow, Result};
use std::{fs, path::Path};

/// Parses the Pisinger-style text format: whitespace-separated `key value`
/// header lines (`n` item count, `c` capacity, `z` known optimum), then one
/// comma-separated `index,value,weight,flag` line per item. Blank lines,
/// label lines and unknown header keys (e.g. `time`) are skipped.
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut num_items: Option<usize> = None;
    let mut capacity: Option<u64> = None;
    let mut optimum: Option<u64> = None;
    let mut values: Vec<u32> = Vec::new();
    let mut weights: Vec<u32> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains(',') {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 3 {
                return Err(anyhow!("Malformed item line '{}'", line));
            }
            values.push(parse_item_field(fields[1], line)?);
            weights.push(parse_item_field(fields[2], line)?);
        } else {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("n"), Some(v)) => num_items = Some(parse_header_value("n", v)? as usize),
                (Some("c"), Some(v)) => capacity = Some(parse_header_value("c", v)?),
                (Some("z"), Some(v)) => optimum = Some(parse_header_value("z", v)?),
                _ => {}
            }
        }
    }

    let num_items = num_items.ok_or_else(|| anyhow!("Header is missing required key 'n'"))?;
    let capacity = capacity.ok_or_else(|| anyhow!("Header is missing required key 'c'"))?;
    if values.len() != num_items {
        return Err(anyhow!(
            "Header declares {} items but {} were found",
            num_items,
            values.len()
        ));
    }

    Ok(Instance {
        values,
        weights,
        capacity,
        optimum,
    })
}

fn parse_header_value(key: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| anyhow!("Invalid value '{}' for header key '{}'", value, key))
}

fn parse_item_field(field: &str, line: &str) -> Result<u32> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid number '{}' in item line '{}'", field.trim(), line))
}

pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read instance file '{}': {}", path.display(), e))?;
    parse_instance(&text)
}

/// Inverse of [`parse_instance`]; item indices are written 1-based as in the
/// published data files. The `z` header is omitted when the optimum is
/// unknown, so rendering and parsing round-trip.
pub fn render_instance(instance: &Instance) -> String {
    let mut out = format!("n {}\nc {}\n", instance.num_items(), instance.capacity);
    if let Some(optimum) = instance.optimum {
        out.push_str(&format!("z {}\n", optimum));
    }
    out.push_str("time 0.00\n");
    for i in 0..instance.num_items() {
        out.push_str(&format!(
            "{},{},{},0\n",
            i + 1,
            instance.values[i],
            instance.weights[i]
        ));
    }
    out
}
