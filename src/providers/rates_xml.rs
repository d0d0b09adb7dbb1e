//! Loads the initial rate table from a `<rates>` XML document:
//!
//! ```xml
//! <rates>
//!   <rate>
//!     <from>AUD</from>
//!     <to>CAD</to>
//!     <conversion>1.0079</conversion>
//!   </rate>
//! </rates>
//! ```

use crate::core::edge::{ConversionEdge, RawRate};
use anyhow::{Context, Result, anyhow};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn load_rates(path: &Path) -> Result<Vec<ConversionEdge>> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rates file: {}", path.display()))?;
    let edges = parse_rates(&xml)
        .with_context(|| format!("Failed to parse rates file: {}", path.display()))?;
    debug!("Loaded {} rates from {}", edges.len(), path.display());
    Ok(edges)
}

#[derive(Clone, Copy)]
enum Field {
    From,
    To,
    Conversion,
}

pub fn parse_rates(xml: &str) -> Result<Vec<ConversionEdge>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut edges = Vec::new();
    let mut current: Option<RawRate> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"rate" => current = Some(RawRate::default()),
                b"from" if current.is_some() => field = Some(Field::From),
                b"to" if current.is_some() => field = Some(Field::To),
                b"conversion" if current.is_some() => field = Some(Field::Conversion),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let (Some(rate), Some(field)) = (current.as_mut(), field) {
                    let text = std::str::from_utf8(e)
                        .context("Rate text is not valid UTF-8")?
                        .to_string();
                    match field {
                        Field::From => rate.from = Some(text),
                        Field::To => rate.to = Some(text),
                        Field::Conversion => rate.conversion = Some(text),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"rate" => {
                    let raw = current
                        .take()
                        .ok_or_else(|| anyhow!("Unbalanced </rate> at rate {}", edges.len() + 1))?;
                    let edge = ConversionEdge::try_from(raw)
                        .with_context(|| format!("Invalid rate #{}", edges.len() + 1))?;
                    edges.push(edge);
                }
                b"from" | b"to" | b"conversion" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(edges)
}
