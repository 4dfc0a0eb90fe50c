//! Reading collections from the plain-text document and query files.
//!
//! Both files are whitespace-separated token streams whose first token is the
//! number of entries. In the documents file a token starting with a digit
//! switches the current document id. In the queries file digit tokens
//! alternate between a query id and that query's response count. Every other
//! token is a word of the current entry and is normalized with
//! [`normalize_word`].

use std::{fs, path::Path};

use log::{debug, warn};

use crate::{
    config::{MAX_DECLARED_ENTRIES, STRIPPED_PUNCTUATION},
    error::{RankError, Result},
    vectorizer::collection::Collection,
};

/// Lower-case ASCII letters and drop the stripped punctuation set.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn starts_with_digit(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

/// Value of the leading digit run of `token`.
fn leading_number(token: &str, position: usize) -> Result<usize> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().map_err(|_| RankError::Parse {
        position,
        message: format!("`{token}` is not a valid number"),
    })
}

fn header(tokens: &mut std::iter::Enumerate<std::str::SplitWhitespace<'_>>, what: &str) -> Result<usize> {
    match tokens.next() {
        Some((position, token)) if starts_with_digit(token) => {
            let count = leading_number(token, position)?;
            if count > MAX_DECLARED_ENTRIES {
                return Err(RankError::Parse {
                    position,
                    message: format!("{count} {what} declared, at most {MAX_DECLARED_ENTRIES} supported"),
                });
            }
            Ok(count)
        }
        Some((position, token)) => Err(RankError::Parse {
            position,
            message: format!("expected the number of {what}, found `{token}`"),
        }),
        None => Err(RankError::Parse {
            position: 0,
            message: format!("missing the number of {what}"),
        }),
    }
}

fn check_range(id: usize, len: usize, position: usize, what: &str) -> Result<usize> {
    if id == 0 || id > len {
        return Err(RankError::Parse {
            position,
            message: format!("{what} id {id} outside 1..={len}"),
        });
    }
    Ok(id)
}

/// Add the documents described by `text` to `collection`.
///
/// Every id in `1..=N` is registered even if it never appears, so a missing
/// document becomes an empty one.
pub fn parse_documents(text: &str, collection: &mut Collection) -> Result<()> {
    let mut tokens = text.split_whitespace().enumerate();
    let doc_num = header(&mut tokens, "documents")?;
    for id in 1..=doc_num {
        collection.add_document(id, Vec::<String>::new());
    }

    let mut current = None;
    let mut seen = vec![false; doc_num];
    for (position, token) in tokens {
        if starts_with_digit(token) {
            let id = check_range(leading_number(token, position)?, doc_num, position, "document")?;
            if seen[id - 1] {
                warn!("document {} declared again at token {}, appending", id, position);
            }
            seen[id - 1] = true;
            current = Some(id);
            continue;
        }
        let id = current.ok_or_else(|| RankError::Parse {
            position,
            message: format!("word `{token}` before any document id"),
        })?;
        let word = normalize_word(token);
        if !word.is_empty() {
            collection.add_document(id, [word]);
        }
    }
    debug!("parsed {} documents", doc_num);
    Ok(())
}

/// Add the queries and response counts described by `text` to `collection`.
pub fn parse_queries(text: &str, collection: &mut Collection) -> Result<()> {
    let mut tokens = text.split_whitespace().enumerate();
    let query_num = header(&mut tokens, "queries")?;
    for id in 1..=query_num {
        collection.add_query(id, Vec::<String>::new());
    }

    let mut current = None;
    let mut awaiting_count = false;
    for (position, token) in tokens {
        if starts_with_digit(token) {
            let number = leading_number(token, position)?;
            if awaiting_count {
                if let Some(id) = current {
                    collection.set_response_count(id, number);
                }
                awaiting_count = false;
            } else {
                current = Some(check_range(number, query_num, position, "query")?);
                awaiting_count = true;
            }
            continue;
        }
        let id = current.ok_or_else(|| RankError::Parse {
            position,
            message: format!("word `{token}` before any query id"),
        })?;
        let word = normalize_word(token);
        if !word.is_empty() {
            collection.add_query(id, [word]);
        }
    }
    debug!("parsed {} queries", query_num);
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RankError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read both files into a validated collection.
pub fn load_collection(documents: &Path, queries: &Path) -> Result<Collection> {
    let mut collection = Collection::new();
    parse_documents(&read(documents)?, &mut collection)?;
    parse_queries(&read(queries)?, &mut collection)?;
    collection.validate()?;
    Ok(collection)
}
