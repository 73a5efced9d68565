use svg_shape::prelude::*;
use std::process::exit;

fn usage() -> ! {
    eprintln!("usage: svg-shape <path data> [x y width height]");
    exit(2)
}

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let data = args.next().unwrap_or_else(|| usage());
    let numbers: Result<Vec<f64>, _> = args.map(|s| s.parse()).collect();
    let numbers = numbers.unwrap_or_else(|_| usage());

    let result = match numbers.as_slice() {
        [] => svg_shape::path_to_shape_group(&data),
        &[x, y, width, height] => svg_shape::convert(&data, &Frame::new(x, y, width, height)),
        _ => usage(),
    };
    match result {
        Ok(group) => {
            println!("{:#?}", group);
            println!("{}", group);
        }
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
