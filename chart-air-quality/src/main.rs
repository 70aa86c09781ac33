mod model;

use baq_log::AQ_LOGGER;
use log::{info, LevelFilter};
use model::{DashboardModel, APP_DIV_ID};

fn main() {
    log::set_logger(&AQ_LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let div_element = web_sys::window()
        .and_then(|window| window.document())
        .map_or_else(
            || {
                let log_str = "failed to resolve the window document";
                info!("{}", log_str);
                panic!("{}", log_str);
            },
            |document| match document.get_element_by_id(APP_DIV_ID) {
                Some(div_element) => div_element,
                None => {
                    let div_element = document.create_element("div").unwrap();
                    div_element.set_attribute("id", APP_DIV_ID).unwrap();
                    if let Some(body) = document.body() {
                        body.append_child(&div_element).unwrap();
                    }
                    div_element
                }
            },
        );

    let renderer = yew::Renderer::<DashboardModel>::with_root(div_element);
    renderer.render();
}
