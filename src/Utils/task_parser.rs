/// parse task documents like
/// ```text
/// refinement
///   method: multiple_class
///   top_percent: 0.3
/// logging
///   loglevel: info
/// ```
/// into `HashMap<title, HashMap<key, Option<Vec<Value>>>>`. A template fills keys missing
/// from the document with `None`. Lines starting with //, #, % or ; are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, separated_pair},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// integer first, then float, then boolean, anything else stays a string
    pub fn from_token(token: &str) -> Value {
        let token = token.trim();
        if let Ok(val) = token.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = token.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = token.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(token.to_string())
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self { Some(s) } else { None }
    }

    /// floats and integers both read as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self { Some(*i) } else { None }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self { Some(*b) } else { None }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word characters, starting with a letter or underscore; used for titles and keys
pub(crate) fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    let token = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';'));
    map(token, Value::from_token).parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    separated_list1(delimited(space0, tag(","), space0), parse_value).parse(input)
}

pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    separated_pair(
        parse_identifier,
        delimited(space0, tag(":"), space0),
        parse_value_list,
    )
    .parse(input)
}

/// a title followed by at least one `key: values` line
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = delimited(multispace0, parse_identifier, multispace0).parse(input)?;
    let (input, pairs) =
        many1(delimited(multispace0, parse_key_value_pair, space0)).parse(input)?;
    let section = pairs
        .into_iter()
        .map(|(key, values)| (key, Some(values)))
        .collect();
    Ok((input, (title, section)))
}

fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with('%')
                || trimmed.starts_with(';')
                || trimmed.is_empty())
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// parses the whole document; anything left unparsed is an error
pub fn parse_document(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let (remaining, sections) = many1(parse_section)
        .parse(filtered.as_str())
        .map_err(|e| format!("Parsing error: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining.trim()
        ));
    }
    let mut document = DocumentMap::new();
    for (title, section) in sections {
        document.entry(title).or_default().extend(section);
    }
    Ok(document)
}

/// parses the document and adds every templated title and key that is missing, as None
pub fn parse_document_with_template(
    input: &str,
    template: &DocumentMap,
) -> Result<DocumentMap, String> {
    let mut document = parse_document(input)?;
    for (title, keys) in template {
        let section = document.entry(title.clone()).or_default();
        for key in keys.keys() {
            section.entry(key.clone()).or_insert(None);
        }
    }
    Ok(document)
}

/// "title.key" of every entry of the document the template does not know
pub fn unknown_keys(document: &DocumentMap, template: &DocumentMap) -> Vec<String> {
    let mut unknown = Vec::new();
    for (title, section) in document {
        for key in section.keys() {
            let known = template
                .get(title)
                .map(|keys| keys.contains_key(key))
                .unwrap_or(false);
            if !known {
                unknown.push(format!("{}.{}", title, key));
            }
        }
    }
    unknown.sort();
    unknown
}
