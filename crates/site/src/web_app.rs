use carousel_runtime::{DisplayMode, ImageCarouselGallery};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::catalog::{first_gallery_of, gallery, gallery_catalog, GalleryEntry};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Trattoria" />
        <Meta name="description" content="Seasonal Italian cooking, photographed." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=HomePage />
                    <Route path="/galleries/:carousel_id" view=GalleryRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
/// Landing page: hero carousel on top, footer strip below.
pub fn HomePage() -> impl IntoView {
    let hero = first_gallery_of(DisplayMode::SingleFade);
    let footer = first_gallery_of(DisplayMode::Strip);

    view! {
        <section class="site-hero">
            {hero.map(|entry| view! { <ImageCarouselGallery config=entry.config.clone() /> })}
        </section>
        <nav class="site-gallery-index" aria-label="Galleries">
            <ul>
                {gallery_catalog()
                    .iter()
                    .map(|entry| {
                        let href = format!("/galleries/{}", entry.config.carousel_id);
                        view! {
                            <li>
                                <A href=href>{entry.title.clone()}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
        <footer class="site-footer">
            {footer
                .map(|entry| {
                    view! {
                        <h2 class="site-footer__title">{entry.title.clone()}</h2>
                        <ImageCarouselGallery config=entry.config.clone() />
                    }
                })}
        </footer>
    }
}

#[component]
/// Standalone page for one catalog gallery.
pub fn GalleryRoute() -> impl IntoView {
    let params = use_params_map();
    let entry = create_memo(move |_| {
        params
            .with(|map| map.get("carousel_id").cloned())
            .and_then(|carousel_id| gallery(&carousel_id))
    });

    move || match entry.get() {
        Some(entry) => view! { <GalleryPage entry /> }.into_view(),
        None => view! {
            <section class="gallery-page gallery-page--missing">
                <h1>"Gallery not found"</h1>
                <A href="/">"Back to the home page"</A>
            </section>
        }
        .into_view(),
    }
}

#[component]
fn GalleryPage(entry: &'static GalleryEntry) -> impl IntoView {
    view! {
        <Title text=entry.title.clone() />
        <section class="gallery-page" data-gallery=entry.config.carousel_id.clone()>
            <h1>{entry.title.clone()}</h1>
            <ImageCarouselGallery config=entry.config.clone() />
            <A href="/">"Back to the home page"</A>
        </section>
    }
}
