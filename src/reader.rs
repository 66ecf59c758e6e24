use crate::coerce::coerce_value_list;
use crate::error::{Diagnostic, NamelistError};
use crate::flatten::{default_subscript, flatten};
use crate::lexer::{LineEvent, normalize_line, restore_token};
use crate::reassembler::{Reassembler, Statement};
use crate::schema::{ParameterSchema, Registry};
use crate::store::ParsedDocument;
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

static SUBSCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*\(([0-9]+(?:,[0-9]+)*)\)$").unwrap());

/// One assignment statement split into its target and its raw value list
#[derive(Debug)]
pub(crate) struct Assignment<'reg, 'txt> {
    pub(crate) param: &'reg ParameterSchema,
    pub(crate) subscript: Vec<usize>,
    pub(crate) rhs: &'txt str,
}

/// Read a namelist file.
///
/// Capacity problems are collected in `diagnostics`; all other problems abort the read.
pub(crate) fn read_namelist(
    path: &Path,
    registry: &Registry,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ParsedDocument, NamelistError> {
    if !path.exists() {
        return Err(NamelistError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| NamelistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // the file is closed when the reader is dropped, also on early termination and on errors
    let lines = BufReader::new(file).lines().map(|line| {
        line.map_err(|source| NamelistError::Io {
            path: path.to_path_buf(),
            source,
        })
    });
    parse_lines(lines, registry, diagnostics)
}

/// Parse namelist text held in memory
pub(crate) fn parse_str(
    text: &str,
    registry: &Registry,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ParsedDocument, NamelistError> {
    parse_lines(
        text.lines().map(|line| Ok(line.to_string())),
        registry,
        diagnostics,
    )
}

fn parse_lines(
    lines: impl Iterator<Item = Result<String, NamelistError>>,
    registry: &Registry,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ParsedDocument, NamelistError> {
    let mut document = ParsedDocument::new();
    let mut reassembler = Reassembler::default();

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 1;
        match normalize_line(&line) {
            LineEvent::Skip => {}
            LineEvent::Terminate => break,
            LineEvent::Line { text, terminate } => {
                for statement in reassembler.push_line(&text, line_no) {
                    apply_statement(&mut document, registry, &statement, diagnostics)?;
                }
                if terminate {
                    break;
                }
            }
        }
    }
    if let Some(statement) = reassembler.finish() {
        apply_statement(&mut document, registry, &statement, diagnostics)?;
    }

    Ok(document)
}

/// Decode a statement and store its values
fn apply_statement(
    document: &mut ParsedDocument,
    registry: &Registry,
    statement: &Statement,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), NamelistError> {
    store_statement(document, registry, statement, diagnostics)
        .map_err(|err| err.at_line(statement.line))
}

fn store_statement(
    document: &mut ParsedDocument,
    registry: &Registry,
    statement: &Statement,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), NamelistError> {
    let Assignment {
        param,
        subscript,
        rhs,
    } = parse_assignment(&statement.text, registry)?;

    let flat_index = flatten(&param.name, &subscript, &param.dims)?;
    let available = flat_index.flat_max - flat_index.offset;
    let list = coerce_value_list(rhs, param.scalar_type, available)?;
    if list.trimmed() > 0 {
        diagnostics.push(Diagnostic::CapacityExceeded {
            param: param.name.clone(),
            line: statement.line,
            capacity: flat_index.flat_max,
            trimmed: list.trimmed(),
        });
    }

    document.scatter(registry, param, flat_index.offset, &list.values)
}

/// Split a statement into its target parameter, subscript and value list
pub(crate) fn parse_assignment<'reg, 'txt>(
    text: &'txt str,
    registry: &'reg Registry,
) -> Result<Assignment<'reg, 'txt>, NamelistError> {
    let Some((lhs, rhs)) = text.split_once('=') else {
        return Err(NamelistError::DanglingValues {
            token: restore_token(text),
        });
    };

    let name = lhs.split('(').next().unwrap_or(lhs);
    let Some(param) = registry.parameter(name) else {
        return Err(NamelistError::UnknownParameter {
            token: name.to_string(),
        });
    };

    let subscript = if lhs.contains('(') {
        let Some(captures) = SUBSCRIPT_REGEX.captures(lhs) else {
            return Err(NamelistError::InvalidSubscript {
                param: param.name.clone(),
                token: lhs.to_string(),
            });
        };
        captures[1]
            .split(',')
            .map(|idx| {
                idx.parse::<usize>()
                    .map_err(|_| NamelistError::InvalidSubscript {
                        param: param.name.clone(),
                        token: lhs.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        // no subscript: start at the first element of every dimension
        default_subscript(&param.dims)
    };

    Ok(Assignment {
        param,
        subscript,
        rhs,
    })
}
