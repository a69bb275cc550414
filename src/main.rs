use log::error;

fn main() {
    if let Err(failure) = ember::run() {
        error!("{}", failure);
        eprintln!("ember: {}", failure);
        std::process::exit(1);
    }
}
