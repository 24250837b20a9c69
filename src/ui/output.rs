use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn changed(path: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::MOD.style(theme().warn.clone()), path);
}

pub fn watching(path: &str) {
    if is_quiet() {
        return;
    }
    println!("{} Watching {}", Icons::EYE, path.style(theme().header.clone()));
}

pub fn listening(addr: &str) {
    if is_quiet() {
        return;
    }
    println!("{} Server running at http://{}", Icons::GLOBE, addr);
}

