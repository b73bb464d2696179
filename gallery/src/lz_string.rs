//! A port of the "encoded URI component" variant of the JavaScript
//! [lz-string](https://github.com/pieroxy/lz-string) library.
//!
//! Share links are produced in the browser by lz-string, so the bit layout
//! here has to match it exactly. Like lz-string, this works on UTF-16 code
//! units rather than bytes or chars.
//!
//! The compressor is LZW-like: every phrase is written as a dictionary code
//! whose width grows as the dictionary does, and characters are introduced
//! into the dictionary inline the first time they're seen. Bits are packed
//! six at a time into characters of the URI-safe alphabet.

use std::collections::{HashMap, HashSet};

/// Only the first 64 symbols are ever written. The trailing `$` is still
/// recognized when reading, as value 64, whose low six bits are all zero.
const URI_SAFE_ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-$";

const BITS_PER_CHAR: u32 = 6;

/// Reading starts at the high bit of each 6-bit alphabet value.
const READ_RESET_MASK: u32 = 1 << (BITS_PER_CHAR - 1);

/// Code introducing an 8-bit character.
const CHAR_8: u32 = 0;

/// Code introducing a 16-bit character.
const CHAR_16: u32 = 1;

const END_OF_STREAM: u32 = 2;

pub fn compress_to_encoded_uri_component<T: AsRef<str>>(input: T) -> String {
    let units: Vec<u16> = input.as_ref().encode_utf16().collect();
    Compressor::new().compress(&units)
}

/// Returns `None` if the input is empty, refers to dictionary entries that
/// don't exist, or decompresses to something that isn't valid UTF-16.
///
/// Note that input which simply runs out before an end-of-stream marker
/// decompresses to an empty string, matching lz-string.
pub fn decompress_from_encoded_uri_component<T: AsRef<str>>(input: T) -> Option<String> {
    let input = input.as_ref();
    if input.is_empty() {
        return None;
    }
    let values: Vec<u32> = input.encode_utf16().map(alphabet_value).collect();
    let units = decompress(&values)?;
    String::from_utf16(&units).ok()
}

/// Characters outside the alphabet read as zero, like lz-string's lookup
/// returning `undefined`. Spaces are what `+` turns into when a fragment gets
/// form-decoded somewhere along the way, so they're read as `+`.
fn alphabet_value(unit: u16) -> u32 {
    let unit = if unit == u16::from(b' ') { u16::from(b'+') } else { unit };
    URI_SAFE_ALPHABET
        .iter()
        .position(|&c| u16::from(c) == unit)
        .unwrap_or(0) as u32
}

struct BitWriter {
    output: String,
    value: u32,
    position: u32,
}

impl BitWriter {
    fn new() -> Self {
        BitWriter {
            output: String::new(),
            value: 0,
            position: 0,
        }
    }

    fn write_bit(&mut self, bit: u32) {
        self.value = (self.value << 1) | bit;
        if self.position == BITS_PER_CHAR - 1 {
            self.position = 0;
            self.push_value();
        } else {
            self.position += 1;
        }
    }

    /// Writes the low `count` bits of `value`, least significant first.
    fn write_bits(&mut self, count: u32, mut value: u32) {
        for _ in 0..count {
            self.write_bit(value & 1);
            value >>= 1;
        }
    }

    fn push_value(&mut self) {
        self.output
            .push(URI_SAFE_ALPHABET[self.value as usize] as char);
        self.value = 0;
    }

    /// Pads out the final character. This always emits one more character,
    /// even when the stream is already aligned.
    fn finish(mut self) -> String {
        loop {
            self.value <<= 1;
            if self.position == BITS_PER_CHAR - 1 {
                self.push_value();
                return self.output;
            }
            self.position += 1;
        }
    }
}

struct Compressor {
    dictionary: HashMap<Vec<u16>, u32>,
    /// Characters that are in the dictionary but haven't been written to the
    /// stream yet.
    unannounced: HashSet<u16>,
    dict_size: u32,
    num_bits: u32,
    enlarge_in: u32,
    writer: BitWriter,
}

impl Compressor {
    fn new() -> Self {
        Compressor {
            dictionary: HashMap::new(),
            unannounced: HashSet::new(),
            dict_size: 3,
            num_bits: 2,
            // The first entry doesn't count.
            enlarge_in: 2,
            writer: BitWriter::new(),
        }
    }

    fn compress(mut self, units: &[u16]) -> String {
        let mut phrase: Vec<u16> = Vec::new();
        for &unit in units {
            if !self.dictionary.contains_key([unit].as_slice()) {
                self.dictionary.insert(vec![unit], self.dict_size);
                self.dict_size += 1;
                self.unannounced.insert(unit);
            }
            let mut extended = phrase.clone();
            extended.push(unit);
            if self.dictionary.contains_key(&extended) {
                phrase = extended;
            } else {
                self.write_phrase(&phrase);
                self.dictionary.insert(extended, self.dict_size);
                self.dict_size += 1;
                phrase = vec![unit];
            }
        }
        if !phrase.is_empty() {
            self.write_phrase(&phrase);
        }
        self.writer.write_bits(self.num_bits, END_OF_STREAM);
        self.writer.finish()
    }

    fn write_phrase(&mut self, phrase: &[u16]) {
        if phrase.len() == 1 && self.unannounced.remove(&phrase[0]) {
            let unit = u32::from(phrase[0]);
            if unit < 256 {
                self.writer.write_bits(self.num_bits, CHAR_8);
                self.writer.write_bits(8, unit);
            } else {
                self.writer.write_bits(self.num_bits, CHAR_16);
                self.writer.write_bits(16, unit);
            }
            self.count_down_to_wider_codes();
        } else {
            let code = self.dictionary[phrase];
            self.writer.write_bits(self.num_bits, code);
        }
        self.count_down_to_wider_codes();
    }

    fn count_down_to_wider_codes(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }
}

struct BitReader<'a> {
    values: &'a [u32],
    value: u32,
    mask: u32,
    /// Index of the next alphabet value to load.
    index: usize,
}

impl<'a> BitReader<'a> {
    fn new(values: &'a [u32]) -> Self {
        BitReader {
            values,
            value: values.first().copied().unwrap_or(0),
            mask: READ_RESET_MASK,
            index: 1,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.index > self.values.len()
    }

    /// Reads `count` bits, least significant first. Past the end of input,
    /// every bit reads as zero.
    fn read_bits(&mut self, count: u32) -> u32 {
        let mut bits = 0;
        for power in 0..count {
            let bit = self.value & self.mask;
            self.mask >>= 1;
            if self.mask == 0 {
                self.mask = READ_RESET_MASK;
                self.value = self.values.get(self.index).copied().unwrap_or(0);
                self.index += 1;
            }
            if bit > 0 {
                bits |= 1 << power;
            }
        }
        bits
    }
}

fn decompress(values: &[u32]) -> Option<Vec<u16>> {
    let mut reader = BitReader::new(values);
    // Codes 0-2 are reserved, so their slots are never looked up.
    let mut dictionary: Vec<Vec<u16>> = vec![vec![], vec![], vec![]];
    let mut enlarge_in: u32 = 4;
    let mut num_bits: u32 = 3;

    let first = match reader.read_bits(2) {
        CHAR_8 => reader.read_bits(8) as u16,
        CHAR_16 => reader.read_bits(16) as u16,
        END_OF_STREAM => return Some(vec![]),
        _ => return None,
    };
    dictionary.push(vec![first]);
    let mut previous = vec![first];
    let mut result = previous.clone();

    loop {
        if reader.is_exhausted() {
            return Some(vec![]);
        }
        let mut code = reader.read_bits(num_bits);
        match code {
            CHAR_8 | CHAR_16 => {
                let width = if code == CHAR_8 { 8 } else { 16 };
                dictionary.push(vec![reader.read_bits(width) as u16]);
                code = (dictionary.len() - 1) as u32;
                enlarge_in -= 1;
            }
            END_OF_STREAM => return Some(result),
            _ => {}
        }
        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let code = code as usize;
        let entry = if code < dictionary.len() {
            dictionary[code].clone()
        } else if code == dictionary.len() {
            // The classic LZW case of a phrase referring to itself.
            let mut entry = previous.clone();
            entry.push(previous[0]);
            entry
        } else {
            return None;
        };
        result.extend_from_slice(&entry);

        let mut new_phrase = previous;
        new_phrase.push(entry[0]);
        dictionary.push(new_phrase);
        enlarge_in -= 1;
        previous = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}
