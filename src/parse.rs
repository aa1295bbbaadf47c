//! GTP token parsing and formatting.
//!
//! Vertices use the GTP convention: column letters `a` to `z` with `i`
//! skipped, rows numbered from 1 at the bottom edge. The literal `pass` maps
//! to [`Tile::NONE`]. Everything here rejects bad input at the boundary and
//! never touches engine state.

use anyhow::{Context, Result, bail};

use crate::tile::{Colour, Tile};

pub fn parse_colour(token: &str) -> Result<Colour> {
    match token.to_ascii_lowercase().as_str() {
        "b" | "black" => Ok(Colour::Black),
        "w" | "white" => Ok(Colour::White),
        _ => bail!("invalid colour '{token}'"),
    }
}

/// Parse a vertex like `d4` (or `pass`) on a board of the given size.
pub fn parse_vertex(token: &str, size: u16) -> Result<Tile> {
    let token = token.to_ascii_lowercase();
    if token == "pass" {
        return Ok(Tile::NONE);
    }

    let mut chars = token.chars();
    let column_char = chars.next().context("empty vertex")?;
    if !column_char.is_ascii_lowercase() {
        bail!("invalid vertex '{token}'");
    }
    let mut column = column_char as u16 - 'a' as u16;
    // the column letter i does not exist
    if column > 8 {
        column -= 1;
    }

    let row: u16 = chars
        .as_str()
        .parse()
        .ok()
        .with_context(|| format!("invalid vertex '{token}'"))?;
    if row == 0 {
        bail!("invalid vertex '{token}'");
    }
    let row = row - 1;

    if column >= size || row >= size {
        bail!("vertex '{token}' is off the board");
    }
    Ok(Tile::from_xy(column, row, size))
}

/// Format a tile the way [`parse_vertex`] reads it.
pub fn vertex_string(tile: Tile, size: u16) -> String {
    if tile.is_none() {
        return "pass".to_string();
    }

    let mut column = tile.index() as u16 % size;
    let row = tile.index() as u16 / size;
    if column > 7 {
        column += 1;
    }
    format!("{}{}", (b'a' + column as u8) as char, row + 1)
}
