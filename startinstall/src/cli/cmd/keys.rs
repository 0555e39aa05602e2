use startinstall_keys::Key;
use std::process::ExitCode;
use strum::IntoEnumIterator;

pub fn run() -> ExitCode {
    println!("Key Name        Scan Code");
    for key in Key::iter() {
        println!("{:15} {}", key.name(), key.scan_code());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run() {
        assert_eq!(run(), ExitCode::SUCCESS);
    }
}
