use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use syllabuzz_core::{AppClient, ArticleQuery, InteractionKey, ViewScope};
use syllabuzz_models::{Article, Module};

use super::action_error;
use crate::cli::{ArticlesArgs, PageArgs};
use crate::output::table::{print_articles, print_bookmarks, print_modules};
use crate::output::{OutputFormat, json::print_json};

#[derive(Serialize)]
struct ModuleDetail {
    module: Module,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<Vec<Article>>,
}

#[derive(Serialize)]
struct ArticleDetail {
    article: Article,
    bookmarked: bool,
    liked: bool,
}

pub async fn modules(client: &AppClient, format: OutputFormat) -> Result<()> {
    let modules = client
        .catalog
        .modules()
        .await
        .map_err(|err| action_error(err, "Loading modules"))?;
    if format.is_json() {
        return print_json(&modules);
    }
    print_modules(&modules)
}

pub async fn module(
    client: &AppClient,
    id: &str,
    with_recommendations: bool,
    format: OutputFormat,
) -> Result<()> {
    let module = client
        .catalog
        .module(id)
        .await
        .map_err(|err| action_error(err, "Loading module"))?;
    let recommendations = if with_recommendations {
        Some(client.catalog.module_recommendations(id, None).await?)
    } else {
        None
    };

    let scope = ViewScope::new();
    let starred = client
        .interactions
        .status(&InteractionKey::star(&module.id), &scope)
        .await
        .unwrap_or(false);

    if format.is_json() {
        return print_json(&ModuleDetail {
            module,
            recommendations,
        });
    }

    let star = if starred { "★".yellow() } else { "☆".dimmed() };
    println!("{star} {} ({})", module.name.bold(), module.code);
    if !module.description.is_empty() {
        println!("{}", module.description);
    }
    if !module.keywords.is_empty() {
        println!("Keywords: {}", module.keywords.join(", "));
    }
    if let Some(recommendations) = recommendations {
        println!();
        println!("{}", "Recommended reading".bold());
        print_articles(&recommendations)?;
    }
    Ok(())
}

pub async fn articles(client: &AppClient, args: ArticlesArgs, format: OutputFormat) -> Result<()> {
    let query = ArticleQuery {
        category: args.category,
        limit: args.limit,
        skip: args.skip,
    };
    let articles = client
        .catalog
        .articles(&query)
        .await
        .map_err(|err| action_error(err, "Loading articles"))?;
    if format.is_json() {
        return print_json(&articles);
    }
    print_articles(&articles)
}

pub async fn relevant(client: &AppClient, args: PageArgs, format: OutputFormat) -> Result<()> {
    let articles = client
        .catalog
        .relevant_articles(args.limit, args.page * args.limit)
        .await
        .map_err(|err| action_error(err, "Loading articles"))?;
    if format.is_json() {
        return print_json(&articles);
    }
    print_articles(&articles)
}

pub async fn trending(
    client: &AppClient,
    days: Option<u32>,
    limit: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let articles = client
        .catalog
        .trending(days, limit)
        .await
        .map_err(|err| action_error(err, "Loading trending articles"))?;
    if format.is_json() {
        return print_json(&articles);
    }
    print_articles(&articles)
}

pub async fn search(
    client: &AppClient,
    query: &str,
    limit: Option<u32>,
    skip: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let articles = client
        .catalog
        .search(query, limit, skip)
        .await
        .map_err(|err| action_error(err, "Search"))?;
    if format.is_json() {
        return print_json(&articles);
    }
    println!("{} result(s) for \"{}\"", articles.len(), query.trim());
    print_articles(&articles)
}

pub async fn recommended(
    client: &AppClient,
    view: &str,
    limit: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    client.auth.require_identity(view)?;
    let articles = client
        .catalog
        .user_recommendations(limit)
        .await
        .map_err(|err| action_error(err, "Loading recommendations"))?;
    if format.is_json() {
        return print_json(&articles);
    }
    print_articles(&articles)
}

pub async fn bookmarks(client: &AppClient, view: &str, pages: u32, format: OutputFormat) -> Result<()> {
    client.auth.require_identity(view)?;

    let mut pager = client.bookmark_pager();
    pager
        .first_page()
        .await
        .map_err(|err| action_error(err, "Loading bookmarks"))?;
    while pager.pages_loaded() < pages && pager.has_more() {
        pager
            .next_page()
            .await
            .map_err(|err| action_error(err, "Loading bookmarks"))?;
    }

    if format.is_json() {
        return print_json(pager.items());
    }
    print_bookmarks(pager.items())?;
    if pager.has_more() {
        println!(
            "{}",
            format!("More saved articles available: --page {}", pager.pages_loaded() + 1).dimmed()
        );
    }
    Ok(())
}

pub async fn starred(client: &AppClient, view: &str, format: OutputFormat) -> Result<()> {
    client.auth.require_identity(view)?;
    let modules = client
        .catalog
        .starred_modules()
        .await
        .map_err(|err| action_error(err, "Loading starred modules"))?;
    if format.is_json() {
        return print_json(&modules);
    }
    print_modules(&modules)
}

pub async fn open(
    client: &AppClient,
    article_id: &str,
    module: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let article = client
        .catalog
        .article(article_id)
        .await
        .map_err(|err| action_error(err, "Loading article"))?;

    let scope = ViewScope::new();
    let bookmark_key = InteractionKey::bookmark(&article.id);
    let like_key = InteractionKey::like(&article.id);
    let (bookmarked, liked) = tokio::join!(
        client.interactions.status(&bookmark_key, &scope),
        client.interactions.status(&like_key, &scope),
    );
    client.catalog.record_view(&article.id, module.as_deref()).await;

    let detail = ArticleDetail {
        bookmarked: bookmarked.unwrap_or(false),
        liked: liked.unwrap_or(false),
        article,
    };
    if format.is_json() {
        return print_json(&detail);
    }

    let article = &detail.article;
    println!("{}", article.title.bold());
    println!(
        "{} · {} · {}",
        article.source_name,
        article.article_type.label(),
        article.published_label()
    );
    if !article.authors.is_empty() {
        println!("By {}", article.authors.join(", "));
    }
    println!();
    println!("{}", article.summary());
    println!();
    println!("{}", article.url.underline());
    if let Some(pdf_url) = &article.pdf_url {
        println!("PDF: {pdf_url}");
    }
    println!(
        "Saved: {}  Liked: {}",
        yes_no(detail.bookmarked),
        yes_no(detail.liked)
    );
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
