//! The positional parameters of a font definition control string.
//!
//! DECDLD takes up to eight semicolon-separated decimal parameters, any
//! of which may be empty. An empty slot is not the same as `0`, and the
//! number of trailing empty slots written in the file is significant for
//! byte-exact round trips, so the text form is remembered verbatim and
//! only rebuilt when a value is changed.

const PARAMETER_COUNT: usize = 8;

// No DECDLD parameter is meaningfully larger than this. Capping at parse
// time keeps the later cell arithmetic in range.
const PARAMETER_MAX: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    values: [Option<i32>; PARAMETER_COUNT],
    used: usize,
    text: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::from_text("")
    }
}

impl Parameters {
    /// Parses the raw parameter text of a control string. Bytes other
    /// than digits and `;` (the tokenizer admits whitespace here) are
    /// ignored, but the text itself is kept unchanged. Values are capped
    /// at [`PARAMETER_MAX`]; an arbitrary digit run never overflows.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut values = [None; PARAMETER_COUNT];
        let mut used = 0;
        let mut value: Option<i32> = None;
        let mut push = |value: Option<i32>, used: &mut usize| {
            if *used < PARAMETER_COUNT {
                values[*used] = value;
            }
            *used += 1;
        };
        for ch in text.bytes() {
            if ch.is_ascii_digit() {
                let digit = i32::from(ch - b'0');
                value = Some((value.unwrap_or(0).saturating_mul(10).saturating_add(digit)).min(PARAMETER_MAX));
            } else if ch == b';' {
                push(value.take(), &mut used);
            }
        }
        push(value, &mut used);
        Self { values, used, text }
    }

    /// Builds a parameter set from explicit values (used for document
    /// defaults). All given slots count as present.
    pub fn from_values(values: &[i32]) -> Self {
        let mut parms = Self {
            values: [None; PARAMETER_COUNT],
            used: values.len(),
            text: String::new(),
        };
        for (slot, &value) in parms.values.iter_mut().zip(values) {
            *slot = Some(value);
        }
        parms.rebuild();
        parms
    }

    /// The serialized text form, byte-for-byte.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Pfn - font number
    pub fn pfn(&self) -> Option<i32> {
        self.values[0]
    }

    pub fn set_pfn(&mut self, value: Option<i32>) {
        self.values[0] = value;
        self.rebuild();
    }

    /// Pcn - starting character
    pub fn pcn(&self) -> Option<i32> {
        self.values[1]
    }

    pub fn set_pcn(&mut self, value: Option<i32>) {
        self.values[1] = value;
        self.rebuild();
    }

    /// Pe - erase control
    pub fn pe(&self) -> Option<i32> {
        self.values[2]
    }

    pub fn set_pe(&mut self, value: Option<i32>) {
        self.values[2] = value;
        self.rebuild();
    }

    /// Pcmw - character matrix width
    pub fn pcmw(&self) -> Option<i32> {
        self.values[3]
    }

    /// Pss - screen size
    pub fn pss(&self) -> Option<i32> {
        self.values[4]
    }

    /// Pu - usage (1 = text, 2 = full cell)
    pub fn pu(&self) -> Option<i32> {
        self.values[5]
    }

    /// Pcmh - character matrix height
    pub fn pcmh(&self) -> Option<i32> {
        self.values[6]
    }

    /// Pcss - character set size (0 = 94 characters, 1 = 96)
    pub fn pcss(&self) -> Option<i32> {
        self.values[7]
    }

    // Emits exactly `used` slots, so trailing empties survive, growing
    // only when a later slot gained a value.
    fn rebuild(&mut self) {
        let last = self.values.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        self.used = self.used.max(last);
        let mut text = String::new();
        for i in 0..self.used {
            if i > 0 {
                text.push(';');
            }
            if let Some(value) = self.values.get(i).copied().flatten() {
                text.push_str(&value.to_string());
            }
        }
        self.text = text;
    }
}
