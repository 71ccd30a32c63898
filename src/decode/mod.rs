// src/decode/mod.rs
// ============================================================================
// DECODE - Decodificación de textos escritos por el usuario
// ============================================================================
//
// MMuM exporta los textos con entidades HTML (&auml;, &#223;, &amp;...).
// El decoder se inyecta en los mappers: nombres, notas, estilo, levadura.
//
// ============================================================================

use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use unicode_normalization::UnicodeNormalization;

/// Capacidad de decodificación de texto inyectada en los mappers
pub trait TextDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> String;
}

/// Resuelve entidades HTML5 y referencias numéricas, después NFC.
/// Cada `&...;` se resuelve por separado: lo que no se reconoce se copia tal cual.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityDecoder;

impl TextDecoder for EntityDecoder {
    fn decode(&self, raw: &str) -> String {
        unescape_lenient(raw).nfc().collect()
    }
}

fn unescape_lenient(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match after.find(';').filter(|&end| resolve_entity(&after[..end], &mut out)) {
            Some(end) => rest = &after[end + 1..],
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Escribe en `out` el texto de la entidad `name` (sin `&` ni `;`).
/// Devuelve false si no es una entidad conocida.
fn resolve_entity(name: &str, out: &mut String) -> bool {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        return match code.filter(|&c| c != 0).and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                true
            }
            None => false,
        };
    }

    match resolve_html5_entity(name) {
        Some(text) => {
            out.push_str(text);
            true
        }
        None => false,
    }
}

/// Identidad, para textos ya decodificados
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughDecoder;

impl TextDecoder for PassthroughDecoder {
    fn decode(&self, raw: &str) -> String {
        raw.to_string()
    }
}
