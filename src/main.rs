fn main() {
  if let Err(e) = fitness_tracker_lib::run() {
    eprintln!("fitness-tracker: {}", e);
    std::process::exit(1);
  }
}
