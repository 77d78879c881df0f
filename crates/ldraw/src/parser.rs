//! Line-oriented LDraw parser.
//!
//! The viewer hands us the complete document text from the textarea, so the
//! parser works synchronously over `&str` lines. Errors carry the 1-based
//! line number they occurred on.

use std::collections::HashMap;
use std::iter::Enumerate;
use std::str::Lines;

use crate::color::{
    ColorReference, CustomizedMaterial, Finish, Material, MaterialRegistry, Rgba,
};
use crate::document::{Document, MultipartDocument};
use crate::elements::{
    BfcCertification, BfcStatement, Command, Header, Line, Meta, OptionalLine, PartReference,
    Quad, Triangle,
};
use crate::error::{ColorDefinitionParseError, DocumentParseError, ParseError};
use crate::{Matrix4, PartAlias, Vector4, Winding};

/// Whitespace-separated token stream over a single line.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Tokens { rest: line }
    }

    fn next(&mut self) -> Result<&'a str, ParseError> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = "";
            return Err(ParseError::EndOfLine);
        }
        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;
        Ok(token)
    }

    /// Everything left on the line, trimmed.
    fn remainder(&mut self) -> Result<&'a str, ParseError> {
        let trimmed = self.rest.trim();
        self.rest = "";
        if trimmed.is_empty() {
            Err(ParseError::EndOfLine)
        } else {
            Ok(trimmed)
        }
    }

    fn next_u32(&mut self) -> Result<u32, ParseError> {
        let token = self.next()?;
        let parsed = match token.strip_prefix("0x") {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => token.parse(),
        };
        parsed.map_err(|_| ParseError::TypeMismatch("u32", token.to_string()))
    }

    fn next_f32(&mut self) -> Result<f32, ParseError> {
        let token = self.next()?;
        token
            .parse()
            .map_err(|_| ParseError::TypeMismatch("f32", token.to_string()))
    }

    /// `#RRGGBB` colour value token.
    fn next_rgb(&mut self) -> Result<(u8, u8, u8), ParseError> {
        let token = self.next()?;
        let hex = token
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .ok_or_else(|| ParseError::InvalidToken(token.to_string()))?;
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ParseError::TypeMismatch("u8", token.to_string()))
        };
        Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    fn next_vector(&mut self) -> Result<Vector4, ParseError> {
        Ok(Vector4::new(
            self.next_f32()?,
            self.next_f32()?,
            self.next_f32()?,
            1.0,
        ))
    }
}

#[cfg_attr(test, derive(PartialEq))]
#[derive(Debug)]
enum Line0 {
    Header(Header),
    Meta(Meta),
    File(String),
    Name(String),
    Author(String),
    BfcCertification(BfcCertification),
}

fn parse_bfc_statement(tokens: &mut Tokens) -> Result<Line0, ParseError> {
    let mut parts = Vec::new();
    while let Ok(token) = tokens.next() {
        parts.push(token);
    }
    let statement = match parts.as_slice() {
        ["NOCERTIFY"] => return Ok(Line0::BfcCertification(BfcCertification::NoCertify)),
        ["CERTIFY"] | ["CERTIFY", "CCW"] => {
            return Ok(Line0::BfcCertification(BfcCertification::Certify(
                Winding::Ccw,
            )))
        }
        ["CERTIFY", "CW"] => {
            return Ok(Line0::BfcCertification(BfcCertification::Certify(
                Winding::Cw,
            )))
        }
        ["CW"] => BfcStatement::Winding(Winding::Cw),
        ["CCW"] => BfcStatement::Winding(Winding::Ccw),
        ["CLIP"] => BfcStatement::Clip(None),
        ["CLIP", "CW"] | ["CW", "CLIP"] => BfcStatement::Clip(Some(Winding::Cw)),
        ["CLIP", "CCW"] | ["CCW", "CLIP"] => BfcStatement::Clip(Some(Winding::Ccw)),
        ["NOCLIP"] => BfcStatement::NoClip,
        ["INVERTNEXT"] => BfcStatement::InvertNext,
        _ => return Err(ParseError::InvalidBfcStatement(parts.join(" "))),
    };
    Ok(Line0::Meta(Meta::Bfc(statement)))
}

fn parse_line_0(tokens: &mut Tokens) -> Result<Line0, ParseError> {
    let text = match tokens.remainder() {
        Ok(text) => text,
        Err(ParseError::EndOfLine) => return Ok(Line0::Meta(Meta::Comment(String::new()))),
        Err(e) => return Err(e),
    };
    let mut inner = Tokens::new(text);
    let cmd = inner.next()?;

    if let Some(key) = cmd.strip_prefix('!') {
        let value = inner.remainder().unwrap_or_default();
        return Ok(Line0::Header(Header(key.to_string(), value.to_string())));
    }

    match cmd {
        "BFC" => parse_bfc_statement(&mut inner),
        "Name:" => Ok(Line0::Name(inner.remainder().unwrap_or_default().to_string())),
        "Author:" => Ok(Line0::Author(
            inner.remainder().unwrap_or_default().to_string(),
        )),
        "FILE" => Ok(Line0::File(inner.remainder()?.to_string())),
        "STEP" => Ok(Line0::Meta(Meta::Step)),
        "WRITE" => Ok(Line0::Meta(Meta::Write(inner.remainder()?.to_string()))),
        "PRINT" => Ok(Line0::Meta(Meta::Print(inner.remainder()?.to_string()))),
        "CLEAR" => Ok(Line0::Meta(Meta::Clear)),
        "PAUSE" => Ok(Line0::Meta(Meta::Pause)),
        "SAVE" => Ok(Line0::Meta(Meta::Save)),
        _ => {
            let comment = text.strip_prefix("//").unwrap_or(text).trim_start();
            Ok(Line0::Meta(Meta::Comment(comment.to_string())))
        }
    }
}

fn parse_line_1(
    materials: &MaterialRegistry,
    tokens: &mut Tokens,
) -> Result<PartReference, ParseError> {
    let color = tokens.next_u32()?;
    let x = tokens.next_f32()?;
    let y = tokens.next_f32()?;
    let z = tokens.next_f32()?;
    let (a, b, c) = (tokens.next_f32()?, tokens.next_f32()?, tokens.next_f32()?);
    let (d, e, f) = (tokens.next_f32()?, tokens.next_f32()?, tokens.next_f32()?);
    let (g, h, i) = (tokens.next_f32()?, tokens.next_f32()?, tokens.next_f32()?);
    // Row-major 3x3 with translation, assembled column by column.
    let matrix = Matrix4::new(
        a, d, g, 0.0, //
        b, e, h, 0.0, //
        c, f, i, 0.0, //
        x, y, z, 1.0,
    );
    Ok(PartReference {
        color: ColorReference::resolve(color, materials),
        matrix,
        name: PartAlias::from(tokens.remainder()?),
    })
}

fn parse_line_2(materials: &MaterialRegistry, tokens: &mut Tokens) -> Result<Line, ParseError> {
    Ok(Line {
        color: ColorReference::resolve(tokens.next_u32()?, materials),
        a: tokens.next_vector()?,
        b: tokens.next_vector()?,
    })
}

fn parse_line_3(
    materials: &MaterialRegistry,
    tokens: &mut Tokens,
) -> Result<Triangle, ParseError> {
    Ok(Triangle {
        color: ColorReference::resolve(tokens.next_u32()?, materials),
        a: tokens.next_vector()?,
        b: tokens.next_vector()?,
        c: tokens.next_vector()?,
    })
}

fn parse_line_4(materials: &MaterialRegistry, tokens: &mut Tokens) -> Result<Quad, ParseError> {
    Ok(Quad {
        color: ColorReference::resolve(tokens.next_u32()?, materials),
        a: tokens.next_vector()?,
        b: tokens.next_vector()?,
        c: tokens.next_vector()?,
        d: tokens.next_vector()?,
    })
}

fn parse_line_5(
    materials: &MaterialRegistry,
    tokens: &mut Tokens,
) -> Result<OptionalLine, ParseError> {
    Ok(OptionalLine {
        color: ColorReference::resolve(tokens.next_u32()?, materials),
        a: tokens.next_vector()?,
        b: tokens.next_vector()?,
        c: tokens.next_vector()?,
        d: tokens.next_vector()?,
    })
}

fn parse_inner(
    materials: &MaterialRegistry,
    lines: &mut Enumerate<Lines>,
    multipart: bool,
) -> Result<(Document, Option<String>), DocumentParseError> {
    let mut next = None;
    let mut name = String::new();
    let mut author = String::new();
    let mut description = String::new();
    let mut bfc = BfcCertification::NotApplicable;
    let mut commands = Vec::new();
    let mut headers = Vec::new();

    let at = |index: usize| move |error| DocumentParseError {
        line: index + 1,
        error,
    };

    'read_loop: for (index, line) in lines {
        let mut tokens = Tokens::new(line);
        let line_type = match tokens.next() {
            Ok(token) => token,
            Err(ParseError::EndOfLine) => continue,
            Err(e) => return Err(at(index)(e)),
        };
        match line_type {
            "0" => match parse_line_0(&mut tokens).map_err(at(index))? {
                Line0::BfcCertification(certification) => {
                    bfc = certification;
                }
                Line0::File(file) => {
                    if !multipart {
                        return Err(at(index)(ParseError::MultipartDocument));
                    }
                    // The first FILE line merely names the body; a later one
                    // starts the next subpart.
                    if !description.is_empty() {
                        next = Some(file);
                        break 'read_loop;
                    }
                }
                Line0::Name(value) => {
                    name = value;
                }
                Line0::Author(value) => {
                    author = value;
                }
                Line0::Meta(Meta::Comment(comment)) if description.is_empty() => {
                    description = comment;
                }
                Line0::Meta(meta) => {
                    commands.push(Command::Meta(meta));
                }
                Line0::Header(header) => {
                    headers.push(header);
                }
            },
            "1" => commands.push(Command::PartReference(
                parse_line_1(materials, &mut tokens).map_err(at(index))?,
            )),
            "2" => commands.push(Command::Line(
                parse_line_2(materials, &mut tokens).map_err(at(index))?,
            )),
            "3" => commands.push(Command::Triangle(
                parse_line_3(materials, &mut tokens).map_err(at(index))?,
            )),
            "4" => commands.push(Command::Quad(
                parse_line_4(materials, &mut tokens).map_err(at(index))?,
            )),
            "5" => commands.push(Command::OptionalLine(
                parse_line_5(materials, &mut tokens).map_err(at(index))?,
            )),
            other => {
                return Err(at(index)(ParseError::UnexpectedCommand(other.to_string())));
            }
        }
    }

    Ok((
        Document {
            name,
            description,
            author,
            bfc,
            headers,
            commands,
        },
        next,
    ))
}

pub fn parse_single_document(
    materials: &MaterialRegistry,
    text: &str,
) -> Result<Document, DocumentParseError> {
    let mut lines = text.lines().enumerate();
    let (document, _) = parse_inner(materials, &mut lines, false)?;
    Ok(document)
}

/// Parse a document that may contain `0 FILE` sections. A plain document
/// yields a body with no subparts.
pub fn parse_multipart_document(
    materials: &MaterialRegistry,
    text: &str,
) -> Result<MultipartDocument, DocumentParseError> {
    let mut lines = text.lines().enumerate();
    let (body, mut next) = parse_inner(materials, &mut lines, true)?;
    let mut subparts = HashMap::new();

    while let Some(file) = next {
        let (subpart, following) = parse_inner(materials, &mut lines, true)?;
        subparts.insert(PartAlias::from(file), subpart);
        next = following;
    }

    Ok(MultipartDocument { body, subparts })
}

fn parse_customized_material(
    tokens: &mut Tokens,
) -> Result<CustomizedMaterial, ColorDefinitionParseError> {
    let kind = tokens.next()?.to_string();
    match tokens.next()? {
        "VALUE" => (),
        e => {
            return Err(ParseError::InvalidToken(e.to_string()).into());
        }
    }
    let (r, g, b) = tokens.next_rgb()?;

    let mut alpha = 255u8;
    let mut luminance = 0u8;
    let mut fraction = 0.0;
    let mut vfraction = 0.0;
    let mut size = 0u32;
    let mut minsize = 0.0;
    let mut maxsize = 0.0;
    loop {
        let token = match tokens.next() {
            Ok(token) => token,
            Err(ParseError::EndOfLine) => break,
            Err(e) => return Err(e.into()),
        };
        match token {
            "ALPHA" => alpha = tokens.next_u32()? as u8,
            "LUMINANCE" => luminance = tokens.next_u32()? as u8,
            "FRACTION" => fraction = tokens.next_f32()?,
            "VFRACTION" => vfraction = tokens.next_f32()?,
            "SIZE" => size = tokens.next_u32()?,
            "MINSIZE" => minsize = tokens.next_f32()?,
            "MAXSIZE" => maxsize = tokens.next_f32()?,
            _ => return Err(ParseError::InvalidToken(token.to_string()).into()),
        }
    }

    let value = Rgba::new(r, g, b, alpha);
    match kind.as_str() {
        "GLITTER" => Ok(CustomizedMaterial::Glitter {
            value,
            luminance,
            fraction,
            vfraction,
            size,
            minsize,
            maxsize,
        }),
        "SPECKLE" => Ok(CustomizedMaterial::Speckle {
            value,
            luminance,
            fraction,
            size,
            minsize,
            maxsize,
        }),
        _ => Err(ColorDefinitionParseError::UnknownMaterial(kind)),
    }
}

/// Build a material registry from `0 !COLOUR` definition lines (LDConfig).
pub fn parse_color_definition(
    text: &str,
) -> Result<MaterialRegistry, ColorDefinitionParseError> {
    let document = parse_single_document(&MaterialRegistry::new(), text)?;

    let mut materials = MaterialRegistry::new();
    for Header(_, value) in document.headers.iter().filter(|h| h.0 == "COLOUR") {
        let mut tokens = Tokens::new(value);
        let name = tokens.next()?.to_string();

        match tokens.next()? {
            "CODE" => (),
            e => return Err(ParseError::InvalidToken(e.to_string()).into()),
        }
        let code = tokens.next_u32()?;

        match tokens.next()? {
            "VALUE" => (),
            e => return Err(ParseError::InvalidToken(e.to_string()).into()),
        }
        let (cr, cg, cb) = tokens.next_rgb()?;

        match tokens.next()? {
            "EDGE" => (),
            e => return Err(ParseError::InvalidToken(e.to_string()).into()),
        }
        let (er, eg, eb) = tokens.next_rgb()?;

        let mut alpha = 255u8;
        let mut luminance = 0u8;
        let mut finish = Finish::Plastic;
        loop {
            let token = match tokens.next() {
                Ok(token) => token,
                Err(ParseError::EndOfLine) => break,
                Err(e) => return Err(e.into()),
            };
            match token {
                "ALPHA" => alpha = tokens.next_u32()? as u8,
                "LUMINANCE" => luminance = tokens.next_u32()? as u8,
                "CHROME" => finish = Finish::Chrome,
                "PEARLESCENT" => finish = Finish::Pearlescent,
                "METAL" => finish = Finish::Metal,
                "RUBBER" => finish = Finish::Rubber,
                "MATTE_METALLIC" => finish = Finish::MatteMetallic,
                "MATERIAL" => {
                    finish = Finish::Custom(parse_customized_material(&mut tokens)?)
                }
                _ => return Err(ParseError::InvalidToken(token.to_string()).into()),
            }
        }

        materials.insert(
            code,
            Material {
                code,
                name,
                color: Rgba::new(cr, cg, cb, alpha),
                edge: Rgba::new(er, eg, eb, 255),
                luminance,
                finish,
            },
        );
    }

    Ok(materials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line_0_or_panic(input: &str) -> Line0 {
        match parse_line_0(&mut Tokens::new(input)) {
            Ok(line0) => line0,
            Err(e) => panic!("cannot parse {}: {}", input, e),
        }
    }

    #[test]
    fn parse_line_0_parses_comment() {
        let cases = [
            ("// This is a comment", "This is a comment"),
            ("This is also a comment", "This is also a comment"),
        ];
        for (input, output) in cases {
            match parse_line_0_or_panic(input) {
                Line0::Meta(Meta::Comment(comment)) => assert_eq!(comment, output),
                parsed => panic!("expected comment, got {:?}", parsed),
            }
        }
    }

    #[test]
    fn parse_line_0_parses_official_meta_commands() {
        let cases = [
            ("STEP", Meta::Step),
            (
                "WRITE any length of string",
                Meta::Write("any length of string".into()),
            ),
            (
                "PRINT also any length of string",
                Meta::Print("also any length of string".into()),
            ),
            ("CLEAR", Meta::Clear),
            ("PAUSE", Meta::Pause),
            ("SAVE", Meta::Save),
        ];
        for (input, output) in cases {
            match parse_line_0_or_panic(input) {
                Line0::Meta(meta) => assert_eq!(meta, output),
                parsed => panic!("expected meta, got {:?}", parsed),
            }
        }
    }

    #[test]
    fn parse_line_0_parses_bfc_statements() {
        let cases = [
            ("BFC CW", BfcStatement::Winding(Winding::Cw)),
            ("BFC CCW", BfcStatement::Winding(Winding::Ccw)),
            ("BFC CLIP", BfcStatement::Clip(None)),
            ("BFC CLIP CW", BfcStatement::Clip(Some(Winding::Cw))),
            ("BFC CLIP CCW", BfcStatement::Clip(Some(Winding::Ccw))),
            ("BFC CW CLIP", BfcStatement::Clip(Some(Winding::Cw))),
            ("BFC CCW CLIP", BfcStatement::Clip(Some(Winding::Ccw))),
            ("BFC NOCLIP", BfcStatement::NoClip),
            ("BFC INVERTNEXT", BfcStatement::InvertNext),
        ];
        for (input, output) in cases {
            match parse_line_0_or_panic(input) {
                Line0::Meta(Meta::Bfc(statement)) => assert_eq!(statement, output),
                parsed => panic!("expected BFC statement, got {:?}", parsed),
            }
        }
    }

    #[test]
    fn parse_line_0_parses_bfc_certificates() {
        let cases = [
            ("BFC NOCERTIFY", BfcCertification::NoCertify),
            ("BFC CERTIFY CW", BfcCertification::Certify(Winding::Cw)),
            ("BFC CERTIFY", BfcCertification::Certify(Winding::Ccw)),
            ("BFC CERTIFY CCW", BfcCertification::Certify(Winding::Ccw)),
        ];
        for (input, output) in cases {
            match parse_line_0_or_panic(input) {
                Line0::BfcCertification(certification) => assert_eq!(certification, output),
                parsed => panic!("expected certification, got {:?}", parsed),
            }
        }
    }

    #[test]
    fn parse_line_0_parses_headers() {
        let cases = [
            (
                "!LDRAW_ORG Part UPDATE 2006-01",
                Header("LDRAW_ORG".into(), "Part UPDATE 2006-01".into()),
            ),
            ("!HELP", Header("HELP".into(), "".into())),
            (
                "!KEYWORDS Sting, Poison, Adventurers, Egypt",
                Header("KEYWORDS".into(), "Sting, Poison, Adventurers, Egypt".into()),
            ),
        ];
        for (input, output) in cases {
            match parse_line_0_or_panic(input) {
                Line0::Header(header) => assert_eq!(header, output),
                parsed => panic!("expected header, got {:?}", parsed),
            }
        }
    }

    #[test]
    fn parse_line_0_parses_name_author_file() {
        assert_eq!(
            parse_line_0_or_panic("Name: 193a.dat"),
            Line0::Name("193a.dat".into())
        );
        assert_eq!(
            parse_line_0_or_panic("Author: Chris Dee [cwdee]"),
            Line0::Author("Chris Dee [cwdee]".into())
        );
        assert_eq!(
            parse_line_0_or_panic("FILE main.ldr"),
            Line0::File("main.ldr".into())
        );
    }

    #[test]
    fn parses_drawing_commands() {
        let text = "0 Two quads\n\
                    2 24 0 0 0 1 0 0\n\
                    3 16 0 0 0 1 0 0 0 1 0\n\
                    4 4 0 0 0 1 0 0 1 1 0 0 1 0\n\
                    5 24 0 0 0 1 0 0 0 1 0 1 1 0\n";
        let document = parse_single_document(&MaterialRegistry::core(), text).unwrap();
        assert_eq!(document.description, "Two quads");
        assert_eq!(document.commands.len(), 4);
        match &document.commands[1] {
            Command::Triangle(triangle) => {
                assert_eq!(triangle.color, ColorReference::Current);
                assert_eq!(triangle.b.x, 1.0);
            }
            other => panic!("expected triangle, got {:?}", other),
        }
    }

    #[test]
    fn part_reference_carries_transform() {
        let text = "1 4 10 20 30 1 0 0 0 1 0 0 0 1 3001.dat";
        let document = parse_single_document(&MaterialRegistry::core(), text).unwrap();
        match &document.commands[0] {
            Command::PartReference(reference) => {
                assert_eq!(reference.name, PartAlias::from("3001.dat"));
                let translated = reference.matrix * Vector4::new(0.0, 0.0, 0.0, 1.0);
                assert_eq!((translated.x, translated.y, translated.z), (10.0, 20.0, 30.0));
            }
            other => panic!("expected part reference, got {:?}", other),
        }
    }

    #[test]
    fn errors_carry_line_numbers() {
        let text = "0 Fine so far\n2 24 0 0 zero 1 0 0\n";
        let err = parse_single_document(&MaterialRegistry::core(), text).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.error,
            ParseError::TypeMismatch("f32", "zero".to_string())
        );
    }

    #[test]
    fn file_section_rejected_outside_multipart() {
        let text = "0 Body\n0 FILE sub.ldr\n";
        let err = parse_single_document(&MaterialRegistry::core(), text).unwrap_err();
        assert_eq!(err.error, ParseError::MultipartDocument);
    }

    #[test]
    fn multipart_collects_subparts() {
        let text = "0 FILE main.ldr\n\
                    0 Main body\n\
                    1 16 0 0 0 1 0 0 0 1 0 0 0 1 brick.ldr\n\
                    0 FILE brick.ldr\n\
                    0 A brick\n\
                    2 24 0 0 0 1 0 0\n";
        let document = parse_multipart_document(&MaterialRegistry::core(), text).unwrap();
        assert_eq!(document.body.description, "Main body");
        assert_eq!(document.subparts.len(), 1);
        let subpart = document.subpart(&PartAlias::from("brick.ldr")).unwrap();
        assert_eq!(subpart.description, "A brick");
        assert_eq!(subpart.commands.len(), 1);
    }

    #[test]
    fn color_definitions_build_a_registry() {
        let text = "0 LDraw.org Configuration File\n\
                    0 !COLOUR Test_Red CODE 900 VALUE #C91A09 EDGE #333333\n\
                    0 !COLOUR Test_Trans CODE 901 VALUE #0055BF EDGE #333333 ALPHA 128\n\
                    0 !COLOUR Test_Glitter CODE 902 VALUE #923978 EDGE #333333 MATERIAL GLITTER VALUE #8C00FF FRACTION 0.3 VFRACTION 0.4 SIZE 1\n";
        let materials = parse_color_definition(text).unwrap();
        assert_eq!(materials.len(), 3);

        let red = materials.get(900).unwrap();
        assert_eq!(red.name, "Test_Red");
        assert_eq!(red.color, Rgba::new(0xc9, 0x1a, 0x09, 255));

        let trans = materials.get(901).unwrap();
        assert!(trans.is_translucent());

        match &materials.get(902).unwrap().finish {
            Finish::Custom(CustomizedMaterial::Glitter { fraction, size, .. }) => {
                assert_eq!(*fraction, 0.3);
                assert_eq!(*size, 1);
            }
            other => panic!("expected glitter, got {:?}", other),
        }
    }
}
