//! Reader for the NeXTSTEP property list format.
//!
//! Xcode stores the entire project in a single file named "project.pbxproj",
//! short for Project Builder XCode Project, living in a folder named after the
//! project with the "xcodeproj" extension. That file uses the old ASCII
//! property list format with the following data types:
//! - String:     contents, "quoted contents" or 'quoted contents'
//! - Array:      ( element, ... )
//! - Dictionary: { key = value; ... }
//! - Data:       <0fbd777f>
//!
//! The GNUstep typed extensions are also accepted:
//! - Integer:    <*I42>
//! - Real:       <*R4.2>
//! - Boolean:    <*BY> or <*BN>
//!
//! Comments have the form /* contents */ or // contents. Xcode adds them after
//! object identifiers and around object sections; they carry no data.
//!
//! Note that unquoted numbers are kept as strings: nothing in the format tells
//! an all-digit object identifier apart from a number.
//!
//! References:
//! - https://en.wikipedia.org/wiki/Property_list
//! - http://www.monobjc.net/xcode-project-file-format.html

use std::path::Path;

use crate::error::{Error, Result};
use crate::store::{Dictionary, Value};

/// Reads and parses a property list file.
pub fn open(path: &Path) -> Result<Value> {
  let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
  parse(&text)
}

pub fn parse(text: &str) -> Result<Value> {
  let mut p = Parser { s: text.as_bytes(), pos: 0 };
  let value = p.value()?;
  p.skip_ws()?;
  match p.peek() {
    None    => Ok(value),
    Some(_) => Err(p.error("unexpected trailing content"))
  }
}

struct Parser<'a> {
  s:   &'a [u8],
  pos: usize
}

fn is_unquoted(c: u8) -> bool {
  c.is_ascii_alphanumeric() || b"_$/:.-+".contains(&c)
}

fn hex_value(c: u8) -> Option<u8> {
  match c {
    b'0' ..= b'9' => Some(c - b'0'),
    b'a' ..= b'f' => Some(c - b'a' + 10),
    b'A' ..= b'F' => Some(c - b'A' + 10),
    _             => None
  }
}

impl<'a> Parser<'a> {
  fn peek(&self) -> Option<u8> {
    self.s.get(self.pos).copied()
  }

  fn error(&self, message: &str) -> Error {
    let before = &self.s[.. self.pos.min(self.s.len())];
    let line   = before.iter().filter(|&&c| c == b'\n').count() + 1;
    let column = self.pos - before.iter().rposition(|&c| c == b'\n').map_or(0, |x| x + 1) + 1;
    Error::Syntax { line, column, message: message.to_string() }
  }

  fn skip_ws(&mut self) -> Result<()> {
    loop {
      match self.peek() {
        Some(c) if c.is_ascii_whitespace() => self.pos += 1,
        Some(b'/') => match self.s.get(self.pos + 1).copied() {
          Some(b'/') => {
            while !matches!(self.peek(), None | Some(b'\n')) {
              self.pos += 1;
            }
          },
          Some(b'*') => {
            let start = self.pos;
            self.pos += 2;
            loop {
              match self.peek() {
                None => {
                  self.pos = start;
                  return Err(self.error("unterminated comment"));
                },
                Some(b'*') if self.s.get(self.pos + 1) == Some(&b'/') => {
                  self.pos += 2;
                  break;
                },
                Some(_) => self.pos += 1
              }
            }
          },
          _ => return Ok(())
        },
        _ => return Ok(())
      }
    }
  }

  fn expect(&mut self, c: u8) -> Result<()> {
    self.skip_ws()?;
    match self.peek() == Some(c) {
      true  => { self.pos += 1; Ok(()) },
      false => Err(self.error(&format!("expected '{}'", c as char)))
    }
  }

  fn value(&mut self) -> Result<Value> {
    self.skip_ws()?;
    match self.peek() {
      Some(b'{')              => self.dictionary(),
      Some(b'(')              => self.array(),
      Some(b'<')              => self.data(),
      Some(b'"') | Some(b'\'') => self.quoted().map(Value::String),
      Some(c) if is_unquoted(c) => Ok(Value::String(self.unquoted())),
      Some(_)                 => Err(self.error("unexpected character")),
      None                    => Err(self.error("unexpected end of input"))
    }
  }

  fn string(&mut self) -> Result<String> {
    self.skip_ws()?;
    match self.peek() {
      Some(b'"') | Some(b'\'')  => self.quoted(),
      Some(c) if is_unquoted(c) => Ok(self.unquoted()),
      _                         => Err(self.error("expected a string"))
    }
  }

  fn dictionary(&mut self) -> Result<Value> {
    self.pos += 1;
    let mut d = Dictionary::new();
    loop {
      self.skip_ws()?;
      if self.peek() == Some(b'}') {
        self.pos += 1;
        return Ok(Value::Dictionary(d));
      }
      let key = self.string()?;
      self.expect(b'=')?;
      let value = self.value()?;
      self.expect(b';')?;
      d.insert(key, value);
    }
  }

  fn array(&mut self) -> Result<Value> {
    self.pos += 1;
    let mut v = Vec::new();
    loop {
      self.skip_ws()?;
      if self.peek() == Some(b')') {
        self.pos += 1;
        return Ok(Value::Array(v));
      }
      v.push(self.value()?);
      self.skip_ws()?;
      match self.peek() {
        Some(b',') => self.pos += 1,
        Some(b')') => {},
        _          => return Err(self.error("expected ',' or ')'"))
      }
    }
  }

  fn data(&mut self) -> Result<Value> {
    self.pos += 1;
    if self.peek() == Some(b'*') {
      return self.typed();
    }

    let mut bytes = Vec::new();
    let mut high: Option<u8> = None;
    loop {
      match self.peek() {
        Some(b'>') => {
          if high.is_some() {
            return Err(self.error("odd number of hex digits in data"));
          }
          self.pos += 1;
          return Ok(Value::Data(bytes));
        },
        Some(c) if c.is_ascii_whitespace() => self.pos += 1,
        Some(c) => match hex_value(c) {
          None    => return Err(self.error("invalid hex digit in data")),
          Some(x) => {
            self.pos += 1;
            match high.take() {
              None    => high = Some(x),
              Some(h) => bytes.push(h << 4 | x)
            }
          }
        },
        None => return Err(self.error("unterminated data"))
      }
    }
  }

  fn typed(&mut self) -> Result<Value> {
    self.pos += 1;
    let kind  = self.peek();
    let start = self.pos + 1;
    let end   = match self.s[start.min(self.s.len()) ..].iter().position(|&c| c == b'>') {
      Some(n) => start + n,
      None    => return Err(self.error("unterminated typed value"))
    };
    let body = std::str::from_utf8(&self.s[start .. end])
      .map_err(|_| self.error("invalid UTF-8 in typed value"))?
      .trim();

    let value = match kind {
      Some(b'I') => body.parse().map(Value::Integer).map_err(|_| self.error("invalid integer"))?,
      Some(b'R') => body.parse().map(Value::Real).map_err(|_| self.error("invalid real"))?,
      Some(b'B') => match body {
        "Y" => Value::Boolean(true),
        "N" => Value::Boolean(false),
        _   => return Err(self.error("invalid boolean"))
      },
      _ => return Err(self.error("unknown typed value"))
    };

    self.pos = end + 1;
    Ok(value)
  }

  fn unquoted(&mut self) -> String {
    let start = self.pos;
    while self.peek().map_or(false, is_unquoted) {
      self.pos += 1;
    }
    // Only ASCII bytes pass `is_unquoted`.
    String::from_utf8_lossy(&self.s[start .. self.pos]).into_owned()
  }

  fn quoted(&mut self) -> Result<String> {
    let quote = self.s[self.pos];
    let start = self.pos;
    self.pos += 1;

    let mut out = Vec::new();
    loop {
      let c = match self.peek() {
        Some(c) => c,
        None    => {
          self.pos = start;
          return Err(self.error("unterminated string"));
        }
      };
      self.pos += 1;

      if c == quote {
        break;
      }
      if c != b'\\' {
        out.push(c);
        continue;
      }

      let e = match self.peek() {
        Some(e) => e,
        None    => return Err(self.error("unterminated escape sequence"))
      };
      self.pos += 1;
      match e {
        b'a' => out.push(0x07),
        b'b' => out.push(0x08),
        b'f' => out.push(0x0C),
        b'n' => out.push(b'\n'),
        b'r' => out.push(b'\r'),
        b't' => out.push(b'\t'),
        b'v' => out.push(0x0B),
        b'U' => {
          let mut code = 0u32;
          for _ in 0 .. 4 {
            match self.peek().and_then(hex_value) {
              Some(x) => { code = code << 4 | u32::from(x); self.pos += 1; },
              None    => return Err(self.error("invalid unicode escape"))
            }
          }
          let ch = std::char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))?;
          let mut buf = [0u8; 4];
          out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        },
        b'0' ..= b'7' => {
          let mut code = u32::from(e - b'0');
          for _ in 0 .. 2 {
            match self.peek() {
              Some(d @ b'0' ..= b'7') => { code = code << 3 | u32::from(d - b'0'); self.pos += 1; },
              _ => break
            }
          }
          match code <= 0x7F {
            true  => out.push(code as u8),
            false => return Err(self.error("octal escape out of range"))
          }
        },
        other => out.push(other)
      }
    }

    String::from_utf8(out).map_err(|_| {
      self.pos = start;
      self.error("invalid UTF-8 in string")
    })
  }
}
