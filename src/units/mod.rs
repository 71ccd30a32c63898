// src/units/mod.rs
// ============================================================================
// UNITS - Conversión de masas y fórmulas cerveceras
// ============================================================================
//
// Funciones puras, sin dependencias:
//   normalize_mass            → kg
//   original_gravity          → OG desde Stammwürze (°P)
//   final_gravity             → FG desde OG + atenuación
//   parse_temperature_range   → "18-22" → (18, 22)
//
// ============================================================================

/// Unidad que ya viene en kilogramos. Cualquier otra se trata como gramos.
pub const KILOGRAM: &str = "kg";

/// Normaliza una masa a kilogramos.
///
/// Si la unidad es `"kg"` la cantidad pasa sin cambios; cualquier otra
/// unidad se interpreta como gramos.
pub fn normalize_mass(amount: f64, unit: &str) -> f64 {
    if unit == KILOGRAM {
        amount
    } else {
        grams_to_kg(amount)
    }
}

/// Gramos → kg (familias de lúpulo, que no tienen campo de unidad)
#[inline]
pub fn grams_to_kg(amount: f64) -> f64 {
    amount / 1000.0
}

/// Densidad original (SG) a partir del extracto de mosto en grados Plato.
pub fn original_gravity(wort_density: f64) -> f64 {
    1.0 + wort_density / (258.6 - (wort_density / 258.2) * 227.1)
}

/// Densidad final a partir de la OG y la atenuación como fracción (0..1).
///
/// Solo debe llamarse cuando existe dato de atenuación; sin él la FG se omite.
pub fn final_gravity(og: f64, attenuation: f64) -> f64 {
    og * (1.0 - attenuation) + attenuation
}

/// Rango de temperatura de fermentación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemperatureRange {
    pub low: Option<i64>,
    pub high: Option<i64>,
}

/// Parte el texto por `-`, descarta los segmentos no numéricos y devuelve
/// el mínimo y el máximo. Sin segmentos válidos ambos límites son `None`.
pub fn parse_temperature_range(text: &str) -> TemperatureRange {
    let numbers: Vec<i64> = text.split('-').filter_map(parse_leading_int).collect();

    TemperatureRange {
        low: numbers.iter().copied().min(),
        high: numbers.iter().copied().max(),
    }
}

/// Entero con semántica laxa: ignora espacios iniciales, acepta signo y
/// lee dígitos hasta el primer carácter no numérico (`"18°C"` → 18).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_mass_kg_passthrough() {
        for x in [0.0, 0.25, 5.0, 1234.5] {
            assert_eq!(normalize_mass(x, "kg"), x);
        }
    }

    #[test]
    fn test_normalize_mass_other_units_are_grams() {
        assert!(approx(normalize_mass(5000.0, "g"), 5.0));
        assert!(approx(normalize_mass(250.0, "gr"), 0.25));
        // Mayúsculas no cuentan como kg
        assert!(approx(normalize_mass(2.0, "KG"), 0.002));
    }

    #[test]
    fn test_original_gravity() {
        assert!(approx(original_gravity(0.0), 1.0));

        let og = original_gravity(12.0);
        let expected = 1.0 + 12.0 / (258.6 - (12.0 / 258.2) * 227.1);
        assert!(approx(og, expected));
        assert!(og > 1.047 && og < 1.050);
    }

    #[test]
    fn test_final_gravity_bounds() {
        let og = 1.048;
        assert!(approx(final_gravity(og, 0.0), og));
        assert!(approx(final_gravity(og, 1.0), 1.0));
        assert!(approx(final_gravity(og, 0.75), og * 0.25 + 0.75));
    }

    #[test]
    fn test_final_gravity_linear_in_og() {
        let a = 0.7;
        let f1 = final_gravity(1.040, a);
        let f2 = final_gravity(1.060, a);
        let f3 = final_gravity(1.080, a);
        assert!(approx(f2 - f1, f3 - f2));
    }

    #[test]
    fn test_parse_temperature_range() {
        assert_eq!(
            parse_temperature_range("18-22"),
            TemperatureRange { low: Some(18), high: Some(22) }
        );
        assert_eq!(
            parse_temperature_range("22-18"),
            TemperatureRange { low: Some(18), high: Some(22) }
        );
        assert_eq!(
            parse_temperature_range("12"),
            TemperatureRange { low: Some(12), high: Some(12) }
        );
    }

    #[test]
    fn test_parse_temperature_range_garbage() {
        assert_eq!(parse_temperature_range("unknown"), TemperatureRange::default());
        assert_eq!(parse_temperature_range(""), TemperatureRange::default());
        assert_eq!(
            parse_temperature_range("ca. 9-12 °C"),
            TemperatureRange { low: Some(12), high: Some(12) }
        );
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(" 18"), Some(18));
        assert_eq!(parse_leading_int("20°C"), Some(20));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
