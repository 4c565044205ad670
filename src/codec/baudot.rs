//! Baudot / ITA2 5-bit codec with LTRS/FIGS shift
//!
//! Two 32-entry tables map 5-bit codes to characters under the current
//! shift. `0x1F` always shifts to LETTERS, `0x1B` always shifts to FIGURES,
//! in both tables, and neither emits a character.

/// Shift state of a Baudot stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Letters,
    Figures,
}

const LTRS_SHIFT_CODE: u8 = 0x1F;
const FIGS_SHIFT_CODE: u8 = 0x1B;
const SPACE_CODE: u8 = 0x04;

/// code -> letter, US-TTY figures variant (consistent with `0x1B`/`0x1F` shift codes).
const LETTERS: [Option<char>; 32] = [
    None,       // 0x00
    Some('E'),  // 0x01
    Some('\n'), // 0x02 LF
    Some('A'),  // 0x03
    Some(' '),  // 0x04
    Some('S'),  // 0x05
    Some('I'),  // 0x06
    Some('U'),  // 0x07
    Some('\r'), // 0x08 CR
    Some('D'),  // 0x09
    Some('R'),  // 0x0A
    Some('J'),  // 0x0B
    Some('N'),  // 0x0C
    Some('F'),  // 0x0D
    Some('C'),  // 0x0E
    Some('K'),  // 0x0F
    Some('T'),  // 0x10
    Some('Z'),  // 0x11
    Some('L'),  // 0x12
    Some('W'),  // 0x13
    Some('H'),  // 0x14
    Some('Y'),  // 0x15
    Some('P'),  // 0x16
    Some('Q'),  // 0x17
    Some('O'),  // 0x18
    Some('B'),  // 0x19
    Some('G'),  // 0x1A
    None,       // 0x1B FIGS shift
    Some('M'),  // 0x1C
    Some('X'),  // 0x1D
    Some('V'),  // 0x1E
    None,       // 0x1F LTRS shift
];

const FIGURES: [Option<char>; 32] = [
    None,       // 0x00
    Some('3'),  // 0x01
    Some('\n'), // 0x02 LF
    Some('-'),  // 0x03
    Some(' '),  // 0x04
    Some('\x07'), // 0x05 BELL
    Some('8'),  // 0x06
    Some('7'),  // 0x07
    Some('\r'), // 0x08 CR
    Some('$'),  // 0x09
    Some('4'),  // 0x0A
    Some('\''), // 0x0B
    Some(','),  // 0x0C
    Some('!'),  // 0x0D
    Some(':'),  // 0x0E
    Some('('),  // 0x0F
    Some('5'),  // 0x10
    Some('"'),  // 0x11
    Some(')'),  // 0x12
    Some('2'),  // 0x13
    Some('#'),  // 0x14
    Some('6'),  // 0x15
    Some('0'),  // 0x16
    Some('1'),  // 0x17
    Some('9'),  // 0x18
    Some('?'),  // 0x19
    Some('&'),  // 0x1A
    None,       // 0x1B FIGS shift
    Some('.'),  // 0x1C
    Some('/'),  // 0x1D
    Some(';'),  // 0x1E
    None,       // 0x1F LTRS shift
];

fn find_code(table: &[Option<char>; 32], ch: char) -> Option<u8> {
    table.iter().position(|&c| c == Some(ch)).map(|i| i as u8)
}

/// Stateful Baudot encoder/decoder: a single `shift` plus the fixed tables.
pub struct BaudotCodec {
    shift: Shift,
}

impl BaudotCodec {
    pub fn new() -> Self {
        Self {
            shift: Shift::Letters,
        }
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    /// Encode text, choosing the shortest code sequence: emit in the current
    /// shift if possible, otherwise switch (emitting the shift code) and
    /// then emit. Unencodable characters emit the space code.
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut codes = Vec::new();
        for ch in text.chars() {
            let ch = ch.to_ascii_uppercase();
            self.encode_char(ch, &mut codes);
        }
        codes
    }

    /// Encode with a preamble of `preamble_codes` LTRS codes, forcing shift
    /// to LETTERS first.
    pub fn encode_with_preamble(&mut self, text: &str, preamble_codes: usize) -> Vec<u8> {
        self.shift = Shift::Letters;
        let mut codes = vec![LTRS_SHIFT_CODE; preamble_codes];
        codes.extend(self.encode(text));
        codes
    }

    fn encode_char(&mut self, ch: char, codes: &mut Vec<u8>) {
        if let Some(code) = find_code(self.current_table(), ch) {
            codes.push(code);
            return;
        }

        let other_shift = match self.shift {
            Shift::Letters => Shift::Figures,
            Shift::Figures => Shift::Letters,
        };
        if let Some(code) = find_code(Self::table_for(other_shift), ch) {
            codes.push(Self::shift_code(other_shift));
            self.shift = other_shift;
            codes.push(code);
            return;
        }

        // Unencodable: emit space, shift unchanged.
        codes.push(SPACE_CODE);
    }

    /// Decode a stream of 5-bit codes. Shift codes change state and yield no
    /// character; nil table slots are silently dropped.
    pub fn decode(&mut self, codes: &[u8]) -> String {
        let mut out = String::new();
        for &code in codes {
            if let Some(ch) = self.decode_code(code) {
                out.push(ch);
            }
        }
        out
    }

    pub(crate) fn decode_code(&mut self, code: u8) -> Option<char> {
        match code {
            LTRS_SHIFT_CODE => {
                self.shift = Shift::Letters;
                None
            }
            FIGS_SHIFT_CODE => {
                self.shift = Shift::Figures;
                None
            }
            _ => self.current_table()[code as usize & 0x1F],
        }
    }

    fn current_table(&self) -> &'static [Option<char>; 32] {
        Self::table_for(self.shift)
    }

    fn table_for(shift: Shift) -> &'static [Option<char>; 32] {
        match shift {
            Shift::Letters => &LETTERS,
            Shift::Figures => &FIGURES,
        }
    }

    fn shift_code(shift: Shift) -> u8 {
        match shift {
            Shift::Letters => LTRS_SHIFT_CODE,
            Shift::Figures => FIGS_SHIFT_CODE,
        }
    }

    pub fn reset(&mut self) {
        self.shift = Shift::Letters;
    }
}

impl Default for BaudotCodec {
    fn default() -> Self {
        Self::new()
    }
}
