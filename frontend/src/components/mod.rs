// Reusable components live here.

pub mod article_body;
pub mod icons;
pub mod loading_spinner;
pub mod table_of_contents;
pub mod toc_thumb;
