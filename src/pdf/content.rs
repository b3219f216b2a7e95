//! Page content stream decoding and operator mapping
//!
//! Turns a page's raw content stream into the closed [`Operator`] vocabulary
//! the classifier understands. Operand decoding happens here, so the
//! classifier only ever sees well-formed operators: a recognized operator
//! with a malformed argument tuple is a processing error at this layer.

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::classify::{Operator, PageGeometry};
use crate::error::{Error, Result};

/// Decode the page's content stream(s) and map each operation to an
/// [`Operator`].
///
/// Recognized operators: `rg` (fill color), `RG` (stroke color), `re`
/// (rectangle), and `Do` naming an Image XObject. Everything else maps to
/// [`Operator::Other`]. A `Do` whose target cannot be resolved to an image
/// also maps to `Other` rather than failing, mirroring how form XObjects
/// and missing resources are skipped rather than treated as corruption.
pub fn operator_stream(doc: &Document, page_id: ObjectId) -> Result<Vec<Operator>> {
    let content_bytes = page_content_bytes(doc, page_id)?;
    let content = Content::decode(&content_bytes)?;
    let xobjects = xobject_dict(doc, page_id);

    let mut operators = Vec::with_capacity(content.operations.len());
    for op in &content.operations {
        let mapped = match op.operator.as_str() {
            "rg" => {
                let (r, g, b) = rgb_operands(&op.operands, "rg")?;
                Operator::SetFillColor { r, g, b }
            }
            "RG" => {
                let (r, g, b) = rgb_operands(&op.operands, "RG")?;
                Operator::SetStrokeColor { r, g, b }
            }
            "re" => {
                if op.operands.len() < 4 {
                    return Err(Error::Processing(
                        "re operator is missing rectangle components".to_string(),
                    ));
                }
                Operator::Rectangle {
                    x: operand_to_f64(&op.operands[0], "re")?,
                    y: operand_to_f64(&op.operands[1], "re")?,
                    width: operand_to_f64(&op.operands[2], "re")?,
                    height: operand_to_f64(&op.operands[3], "re")?,
                }
            }
            "Do" => resolve_image_paint(doc, xobjects, &op.operands),
            _ => Operator::Other,
        };
        operators.push(mapped);
    }

    Ok(operators)
}

/// Read the page dimensions from the (possibly inherited) MediaBox.
pub fn page_geometry(doc: &Document, page_id: ObjectId) -> Result<PageGeometry> {
    let obj = resolve_inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| Error::Processing("MediaBox not found on page or ancestors".to_string()))?;
    let array = resolve(doc, obj)?
        .as_array()
        .map_err(|_| Error::Processing("MediaBox is not an array".to_string()))?;
    if array.len() != 4 {
        return Err(Error::Processing(format!(
            "MediaBox has {} elements, expected 4",
            array.len()
        )));
    }

    let x0 = operand_to_f64(&array[0], "MediaBox")?;
    let y0 = operand_to_f64(&array[1], "MediaBox")?;
    let x1 = operand_to_f64(&array[2], "MediaBox")?;
    let y1 = operand_to_f64(&array[3], "MediaBox")?;

    Ok(PageGeometry {
        width: x1 - x0,
        height: y1 - y0,
    })
}

/// Collect the page's content stream bytes, handling both a single stream
/// and an array of streams, decompressing where a filter is present.
fn page_content_bytes(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|_| Error::Processing("page is not a dictionary".to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        // A page with no content stream draws nothing
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(_) | Object::Stream(_) => decode_stream(doc, contents),
        Object::Array(items) => {
            let mut bytes = Vec::new();
            for item in items {
                let chunk = decode_stream(doc, item)?;
                if !bytes.is_empty() {
                    bytes.push(b' ');
                }
                bytes.extend_from_slice(&chunk);
            }
            Ok(bytes)
        }
        _ => Err(Error::Processing(
            "page Contents is not a stream or array".to_string(),
        )),
    }
}

fn decode_stream(doc: &Document, obj: &Object) -> Result<Vec<u8>> {
    let stream = resolve(doc, obj)?
        .as_stream()
        .map_err(|_| Error::Processing("page Contents is not a stream".to_string()))?;
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|_| Error::Processing("failed to decompress content stream".to_string()))
    } else {
        Ok(stream.content.clone())
    }
}

/// The page's XObject resource dictionary, if any. Resolution failures are
/// treated as "no XObjects": a missing resource makes the matching `Do`
/// unclassifiable, not the document corrupt.
fn xobject_dict<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a Dictionary> {
    let resources = resolve_inherited(doc, page_id, b"Resources").ok()??;
    let resources = resolve(doc, resources).ok()?.as_dict().ok()?;
    let xobjects = resources.get(b"XObject").ok()?;
    resolve(doc, xobjects).ok()?.as_dict().ok()
}

/// Map a `Do` operation to [`Operator::PaintImage`] when it names an Image
/// XObject with usable pixel dimensions, and to [`Operator::Other`]
/// otherwise (form XObjects, unresolvable names, missing dimensions).
fn resolve_image_paint(
    doc: &Document,
    xobjects: Option<&Dictionary>,
    operands: &[Object],
) -> Operator {
    let name = match operands.first().and_then(|o| o.as_name().ok()) {
        Some(name) => name,
        None => return Operator::Other,
    };
    let xobjects = match xobjects {
        Some(dict) => dict,
        None => return Operator::Other,
    };

    let stream = match xobjects
        .get(name)
        .ok()
        .and_then(|obj| resolve(doc, obj).ok())
        .and_then(|obj| obj.as_stream().ok())
    {
        Some(stream) => stream,
        None => return Operator::Other,
    };

    let is_image = stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map(|subtype| subtype == b"Image")
        .unwrap_or(false);
    if !is_image {
        return Operator::Other;
    }

    match (
        stream.dict.get(b"Width").and_then(Object::as_i64),
        stream.dict.get(b"Height").and_then(Object::as_i64),
    ) {
        (Ok(pixel_width), Ok(pixel_height)) => Operator::PaintImage {
            pixel_width,
            pixel_height,
        },
        _ => Operator::Other,
    }
}

/// Look up a key on the page dictionary, walking up the page tree via
/// /Parent when the key is not present on the page itself.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(Object::as_dict)
            .map_err(|_| Error::Processing("page tree node is not a dictionary".to_string()))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent.as_reference().map_err(|_| {
                    Error::Processing("page tree Parent is not a reference".to_string())
                })?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Follow a single reference indirection, leaving direct objects untouched.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).map_err(Error::Pdf),
        _ => Ok(obj),
    }
}

/// Convert a numeric operand (Integer or Real) to f64.
fn operand_to_f64(obj: &Object, context: &str) -> Result<f64> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(Error::Processing(format!(
            "{context} operand is not a number"
        ))),
    }
}

fn rgb_operands(operands: &[Object], context: &str) -> Result<(f64, f64, f64)> {
    if operands.len() < 3 {
        return Err(Error::Processing(format!(
            "{context} operator is missing color components"
        )));
    }
    Ok((
        operand_to_f64(&operands[0], context)?,
        operand_to_f64(&operands[1], context)?,
        operand_to_f64(&operands[2], context)?,
    ))
}
