#[cfg(test)]
pub(crate) mod dummy;
#[cfg(feature = "r2d2")]
mod r2d2;
