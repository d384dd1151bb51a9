// ============================================================================
// FORMATO DE IMPORTES - toLocaleString(locale) + sufijo de moneda
// ============================================================================
// En el navegador el número lo formatea Intl vía js_sys. Fuera de wasm32
// (tests nativos) se usa una aproximación con separadores fijos.
// ============================================================================

use crate::models::Amount;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    pub locale: String,
    /// Texto que se añade tras el número (p.ej. " VNĐ")
    pub suffix: String,
}

impl CurrencyFormat {
    pub fn new(locale: &str, suffix: &str) -> Self {
        Self {
            locale: locale.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Formatear un importe recibido del servidor
    pub fn format_amount(&self, amount: &Amount) -> String {
        match amount {
            Amount::Number(value) => self.format(*value),
            // El texto se muestra tal cual, igual que haría el navegador
            Amount::Text(text) => format!("{}{}", text, self.suffix),
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{}{}", self.localize(value), self.suffix)
    }

    #[cfg(target_arch = "wasm32")]
    fn localize(&self, value: f64) -> String {
        String::from(js_sys::Number::from(value).to_locale_string(&self.locale))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn localize(&self, value: f64) -> String {
        without_intl::format_number(value, &self.locale)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("vi-VN", " VNĐ")
    }
}

/// Número como lo imprime `String(n)` en JS para valores habituales (3.0 -> "3")
pub fn js_number_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Aproximación de `toLocaleString` sin Intl: separadores por idioma,
/// agrupación de 3 en 3 y hasta 3 decimales redondeados al alza desde la
/// representación decimal más corta.
#[cfg(not(target_arch = "wasm32"))]
mod without_intl {
    const MAX_FRACTION_DIGITS: usize = 3;

    fn separators(locale: &str) -> (char, char) {
        let lang = locale.split(['-', '_']).next().unwrap_or_default().to_lowercase();
        match lang.as_str() {
            "en" | "ja" | "zh" | "ko" | "th" => (',', '.'),
            "fr" => ('\u{202f}', ','),
            _ => ('.', ','),
        }
    }

    pub fn format_number(value: f64, locale: &str) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let (thousands, decimal) = separators(locale);
        let (int_part, frac_part) = round_decimal(&format!("{}", value.abs()), MAX_FRACTION_DIGITS);

        let mut out = String::new();
        if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
            out.push('-');
        }
        out.push_str(&group_digits(&int_part, thousands));
        if !frac_part.is_empty() {
            out.push(decimal);
            out.push_str(&frac_part);
        }
        out
    }

    /// Redondeo half-up sobre la cadena decimal; devuelve (entero, decimales sin ceros finales)
    fn round_decimal(repr: &str, digits: usize) -> (String, String) {
        let (int_part, frac) = repr.split_once('.').unwrap_or((repr, ""));
        if frac.len() <= digits {
            return (int_part.to_string(), frac.trim_end_matches('0').to_string());
        }

        let round_up = frac.as_bytes().get(digits).is_some_and(|d| *d >= b'5');
        let mut all: Vec<u8> = int_part
            .bytes()
            .chain(frac.bytes().take(digits))
            .map(|b| b - b'0')
            .collect();

        if round_up {
            let mut carry = true;
            for d in all.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                all.insert(0, 1);
            }
        }

        let split = all.len() - digits;
        let to_str = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
        let int_str = to_str(&all[..split]);
        let frac_str = to_str(&all[split..]);
        (int_str, frac_str.trim_end_matches('0').to_string())
    }

    fn group_digits(digits: &str, separator: char) -> String {
        let len = digits.len();
        let mut grouped = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(c);
        }
        grouped
    }

}
