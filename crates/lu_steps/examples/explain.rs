//! Prints the step-by-step factorization and solution of a system.
//!
//! ```text
//! cargo run --example explain -- "4, 3; 6, 3" "7, 9"
//! ```
//!
//! The second argument is optional; without it `b` is built from the solution `[1, ..., 1]`.
//! Set `RUST_LOG=debug` to see what the solver is doing.

use lu_steps::{explain, parse, Options};

fn print_grid(name: &str, grid: &[Vec<String>]) {
    println!("{name} =");
    for row in grid {
        println!("    [ {} ]", row.join("  "));
    }
}

fn print_vector(name: &str, v: &[String]) {
    println!("{name} = [ {} ]", v.join("  "));
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let matrix_text = args.next().unwrap_or_else(|| "4, 3; 6, 3".to_owned());
    let rhs_text = args.next().unwrap_or_default();

    let rows = matrix_text.trim().split(parse::ROW_SEPARATOR).count();
    let cols = matrix_text
        .trim()
        .split(parse::ROW_SEPARATOR)
        .next()
        .map_or(0, |row| row.split(parse::COLUMN_SEPARATOR).count());

    let result = parse::matrix(&matrix_text, rows, cols).and_then(|a| {
        let b = parse::vector(&rhs_text);
        explain(&a, b.as_ref(), &Options::default())
    });

    let ex = match result {
        Ok(ex) => ex,
        Err(err) => {
            eprintln!("error ({:?}): {}", err.kind(), err);
            std::process::exit(1);
        }
    };

    print_grid("A", &ex.rendered.a);
    println!();
    for record in &ex.u_steps {
        println!("{}", record.latex());
    }
    print_grid("U", &ex.rendered.u);
    println!();
    for record in &ex.l_steps {
        println!("{}", record.latex());
    }
    print_grid("L", &ex.rendered.l);
    println!();

    if let Some(reference) = &ex.rendered.reference {
        print_vector("x (reference)", reference);
    }
    print_vector("b", &ex.rendered.b);
    for record in &ex.y_steps {
        println!("{}", record.latex());
    }
    print_vector("y", &ex.rendered.y);
    println!();
    for record in &ex.x_steps {
        println!("{}", record.latex());
    }
    print_vector("x", &ex.rendered.x);

    if !ex.regularized.is_empty() {
        println!("\nregularized pivots in rows {:?}", ex.regularized);
    }
}
