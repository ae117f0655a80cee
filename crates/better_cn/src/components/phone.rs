//! Phone number field - country dialing code plus local number
//!
//! Values are stored as `"+<code> <number>"`. Splitting a stored value back
//! into its parts is best effort: a space after the code is trusted as the
//! separator; without one the longest known dialing code prefix is used; a
//! value without a leading `+` is all number.

use std::sync::Arc;

use better_core::ValueBinding;

use crate::field::ChangeHandler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountryCode {
    pub iso: &'static str,
    pub dial: &'static str,
    pub name: &'static str,
}

const fn country(iso: &'static str, dial: &'static str, name: &'static str) -> CountryCode {
    CountryCode { iso, dial, name }
}

pub const COUNTRY_CODES: &[CountryCode] = &[
    country("US", "1", "United States"),
    country("RU", "7", "Russia"),
    country("EG", "20", "Egypt"),
    country("ZA", "27", "South Africa"),
    country("GR", "30", "Greece"),
    country("NL", "31", "Netherlands"),
    country("BE", "32", "Belgium"),
    country("FR", "33", "France"),
    country("ES", "34", "Spain"),
    country("HU", "36", "Hungary"),
    country("IT", "39", "Italy"),
    country("RO", "40", "Romania"),
    country("CH", "41", "Switzerland"),
    country("AT", "43", "Austria"),
    country("GB", "44", "United Kingdom"),
    country("DK", "45", "Denmark"),
    country("SE", "46", "Sweden"),
    country("NO", "47", "Norway"),
    country("PL", "48", "Poland"),
    country("DE", "49", "Germany"),
    country("MX", "52", "Mexico"),
    country("BR", "55", "Brazil"),
    country("AU", "61", "Australia"),
    country("NZ", "64", "New Zealand"),
    country("JP", "81", "Japan"),
    country("KR", "82", "South Korea"),
    country("CN", "86", "China"),
    country("TR", "90", "Turkey"),
    country("IN", "91", "India"),
    country("PT", "351", "Portugal"),
    country("IE", "353", "Ireland"),
    country("FI", "358", "Finland"),
    country("BG", "359", "Bulgaria"),
    country("UA", "380", "Ukraine"),
    country("CZ", "420", "Czechia"),
    country("AE", "971", "United Arab Emirates"),
    country("IL", "972", "Israel"),
];

pub fn find_country(dial: &str) -> Option<&'static CountryCode> {
    COUNTRY_CODES.iter().find(|c| c.dial == dial)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhoneParts {
    /// Dialing code digits without the `+`
    pub code: Option<String>,
    pub number: String,
}

/// Best-effort split of a stored phone value
pub fn split_phone(value: &str) -> PhoneParts {
    let value = value.trim();
    let Some(rest) = value.strip_prefix('+') else {
        return PhoneParts {
            code: None,
            number: value.to_string(),
        };
    };
    if let Some((code, number)) = rest.split_once(' ') {
        if !code.is_empty() && code.len() <= 4 && code.bytes().all(|b| b.is_ascii_digit()) {
            return PhoneParts {
                code: Some(code.to_string()),
                number: number.trim().to_string(),
            };
        }
    }
    let best = COUNTRY_CODES
        .iter()
        .filter(|c| rest.starts_with(c.dial))
        .max_by_key(|c| c.dial.len());
    match best {
        Some(c) => PhoneParts {
            code: Some(c.dial.to_string()),
            number: rest[c.dial.len()..].trim().to_string(),
        },
        None => {
            tracing::debug!(%value, "phone value has no recognizable dialing code");
            PhoneParts {
                code: None,
                number: value.to_string(),
            }
        }
    }
}

/// Join parts into a stored value; an empty number is no value
pub fn join_phone(code: Option<&str>, number: &str) -> Option<String> {
    let number = number.trim();
    if number.is_empty() {
        return None;
    }
    Some(match code {
        Some(code) if !code.is_empty() => format!("+{code} {number}"),
        _ => number.to_string(),
    })
}

#[derive(Default)]
pub struct PhoneField {
    binding: ValueBinding<String>,
    /// Code picked while the number is still empty
    selected_code: Option<String>,
    on_change: Option<ChangeHandler<String>>,
}

impl PhoneField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_country(mut self, dial: impl Into<String>) -> Self {
        self.selected_code = Some(dial.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.binding.write(Some(value.into()));
        self
    }

    pub fn value_controlled(mut self, value: impl Into<String>) -> Self {
        self.binding.set_external(Some(value.into()));
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.binding.set_external(value);
    }

    pub fn value(&self) -> Option<&str> {
        self.binding.get().map(String::as_str)
    }

    fn parts(&self) -> PhoneParts {
        self.value().map(split_phone).unwrap_or_default()
    }

    /// Dialing code shown in the selector
    pub fn code(&self) -> Option<String> {
        self.parts().code.or_else(|| self.selected_code.clone())
    }

    pub fn country(&self) -> Option<&'static CountryCode> {
        self.code().as_deref().and_then(find_country)
    }

    pub fn number(&self) -> String {
        self.parts().number
    }

    pub fn set_code(&mut self, dial: impl Into<String>) {
        let dial = dial.into();
        let number = self.number();
        self.selected_code = Some(dial.clone());
        if !number.is_empty() {
            self.emit(join_phone(Some(&dial), &number));
        }
    }

    pub fn set_number(&mut self, number: &str) {
        let code = self.code();
        self.emit(join_phone(code.as_deref(), number));
    }

    fn emit(&mut self, value: Option<String>) {
        self.binding.write(value.clone());
        if let Some(on_change) = &self.on_change {
            on_change(value);
        }
    }
}

impl std::fmt::Debug for PhoneField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneField")
            .field("binding", &self.binding)
            .field("selected_code", &self.selected_code)
            .finish_non_exhaustive()
    }
}

pub fn phone() -> PhoneField {
    PhoneField::new()
}
