use nalgebra::RealField;

/// Turns a scalar into the text shown in derivation records and rendered grids.
pub trait Render<T> {
    fn render(&self, value: T) -> String;

    /// Renders a product term, `a <op> b`.
    fn render_product(&self, a: T, b: T, op: &str) -> String {
        format!("{} {} {}", self.render(a), op, self.render(b))
    }
}

impl<T> Render<T> for rational::Formatter
where
    T: RealField + Copy,
{
    fn render(&self, value: T) -> String {
        self.format(nalgebra::try_convert(value).unwrap_or(f64::NAN))
    }
}
