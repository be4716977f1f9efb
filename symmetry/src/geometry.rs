use std::fmt::Display;

use super::error::{ConfigurationError, SymmetryError, UnsupportedTermError};

// The axes are ordered coordinate labels. A coordinate's position on its axis is its index.

fn index_of<T: PartialEq + Display>(coordinate: &T, axis: &[T]) -> Result<usize, SymmetryError> {
    axis.iter().position(|c| c == coordinate).ok_or_else(|| {
        UnsupportedTermError::CoordinateNotFound {
            coordinate: coordinate.to_string(),
        }
        .into()
    })
}

/// Mirrors `x` about the middle of the x axis.
pub fn reflect_vertical<T>(x: &T, y: &T, x_axis: &[T], _y_axis: &[T]) -> Result<(T, T), SymmetryError>
where
    T: PartialEq + Clone + Display,
{
    let x_idx = index_of(x, x_axis)?;

    Ok((x_axis[x_axis.len() - x_idx - 1].clone(), y.clone()))
}

/// Mirrors `y` about the middle of the y axis.
pub fn reflect_horizontal<T>(x: &T, y: &T, _x_axis: &[T], y_axis: &[T]) -> Result<(T, T), SymmetryError>
where
    T: PartialEq + Clone + Display,
{
    let y_idx = index_of(y, y_axis)?;

    Ok((x.clone(), y_axis[y_axis.len() - y_idx - 1].clone()))
}

/// Rotates a coordinate a quarter turn anti-clockwise. The board must be square.
pub fn rotate_90<T>(x: &T, y: &T, x_axis: &[T], y_axis: &[T]) -> Result<(T, T), SymmetryError>
where
    T: PartialEq + Clone + Display,
{
    if x_axis.len() != y_axis.len() {
        return Err(ConfigurationError::AxisMismatch {
            x_len: x_axis.len(),
            y_len: y_axis.len(),
        }
        .into());
    }

    let x_idx = index_of(x, x_axis)?;
    let y_idx = index_of(y, y_axis)?;

    Ok((
        x_axis[y_idx].clone(),
        y_axis[x_axis.len() - x_idx - 1].clone(),
    ))
}
