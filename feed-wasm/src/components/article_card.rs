use feed_client::Article;
use feed_client::dates::format_day;
use feed_client::images::remove_search_params;
use leptos::prelude::*;

/// Карточка статьи в сетке ленты, поиска или дня.
#[component]
pub(crate) fn ArticleCard(article: Article) -> impl IntoView {
    let image = remove_search_params(&article.image_url);
    let posted = format_day(&article.posted_at);
    let author = article
        .author
        .as_ref()
        .map(|author| author.name.clone())
        .unwrap_or_default();
    let href = article.href.clone().unwrap_or_else(|| "#".to_string());

    view! {
        <article class="article-card">
            <a href=href target="_blank" rel="noopener noreferrer">
                <img src=image alt=article.title.clone() loading="lazy" />
                <span class="tag">{article.tag.clone()}</span>
                <h3>{article.title.clone()}</h3>
            </a>
            <p class="meta">
                <span>{author}</span>
                " · "
                <span>{posted}</span>
                " · "
                <span>{article.read_duration.clone()}</span>
            </p>
        </article>
    }
}
