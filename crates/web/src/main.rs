use taskgrid_web::LoginPage;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<LoginPage>::new().render();
}
