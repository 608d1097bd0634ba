#![allow(non_snake_case)]
use RustedSparseGrid::Examples::refinement_examples::refinement_examples;
use RustedSparseGrid::Utils::logger::init_logger;

fn main() {
    let example = 1;
    match example {
        // 0 - hash refinement by surplus, 1 - two classes around a circle, 2 - task document
        0 | 1 => {
            if let Err(e) = init_logger(Some("info"), false) {
                eprintln!("{}", e);
            }
            refinement_examples(example);
        }
        2 => refinement_examples(2),
        _ => {}
    }
}
