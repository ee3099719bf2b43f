pub mod lifecycle;

#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_lifecycle;
