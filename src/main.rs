mod code_editor;
mod config;
mod date;
mod editor;
mod hooks;
mod judge;
mod login;
mod markdown;
mod navigation;
mod problem_detail;
mod problem_list;
mod problems;
mod routes;
mod theme;
mod workflow;

fn main() {
    dioxus::launch(routes::App);
}
