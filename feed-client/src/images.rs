use url::Url;

/// Убирает query string из ссылки на изображение.
///
/// Если ссылка не разбирается как URL, отрезает всё начиная с `?`.
pub fn remove_search_params(image_url: &str) -> String {
    match Url::parse(image_url) {
        Ok(mut url) => {
            url.set_query(None);
            url.to_string()
        }
        Err(_) => match image_url.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => image_url.to_string(),
        },
    }
}
