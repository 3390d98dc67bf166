pub(crate) mod article_card;
pub(crate) mod day_articles;
pub(crate) mod day_blocks;
pub(crate) mod feed_panel;
pub(crate) mod search_panel;
