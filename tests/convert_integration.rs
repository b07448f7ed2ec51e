//! Library-level conversion over real catalogs on disk

use pagecfg::convert::{BatchConverter, ConvertOptions, PageConverter, PageState, SkipReason, MARKER};
use pagecfg::fs::RealFileSystem;
use pagecfg::{convert_page, LocatorConfig, PageLocator, RecognizedName};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(base: &Path, rel: &str, content: &str) -> PathBuf {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

const LANDING_PAGE: &str = r#""use client";
// Landing page for the summer collection

import Image from 'next/image';

const heroSlides = [
  {
    title: "Summer styles are finally here",
    subtitle: 'This year, our new summer collection will shelter you from the harsh elements.',
    cta: `Shop Collection`,
    image: '/img/hero-1.jpg', // placeholder
  },
];

const testimonials = [
  { id: 1, quote: 'My order arrived super quickly. The product is even better than I hoped it would be.', attribution: 'Sarah Peters, New Orleans' },
  { id: 2, quote: "I had to return a purchase that didn't fit.", attribution: 'Kelly McPherson, Chicago', rating: 4.5 },
];

export default function Landing() {
  const socialLinks = [
    { name: 'Facebook', href: '#' },
    { name: 'Instagram', href: '#' },
  ]
  return (
    <main>
      {heroSlides.map((slide) => <h1 key={slide.title}>{slide.title}</h1>)}
      <p className="text-gray-500">Don't miss out</p>
    </main>
  );
}
"#;

fn config_of(text: &str) -> serde_json::Value {
    let start = text.find("const pageConfig = ").unwrap() + "const pageConfig = ".len();
    let end = start + text[start..].find("};\n").unwrap() + 1;
    serde_json::from_str(&text[start..end]).unwrap()
}

#[test]
fn test_landing_page_conversion() {
    let dir = TempDir::new().unwrap();
    let page = write(dir.path(), "app/landing/page.js", LANDING_PAGE);

    let report = convert_page(dir.path(), &page).unwrap();
    assert!(report.is_converted());
    assert_eq!(report.state, PageState::Written);
    assert_eq!(
        report.keys,
        vec!["colors", "heroSlides", "testimonials", "socialLinks"]
    );

    let text = fs::read_to_string(&page).unwrap();
    assert!(text.starts_with("\"use client\";\n// @pagecfg:generated\n"));
    assert!(text.ends_with(&LANDING_PAGE["\"use client\";\n".len()..]));

    let config = config_of(&text);
    assert_eq!(
        config["heroSlides"][0]["cta"],
        json!("Shop Collection")
    );
    assert_eq!(config["testimonials"][1]["rating"], json!(4.5));
    assert_eq!(
        config["testimonials"][1]["quote"],
        json!("I had to return a purchase that didn't fit.")
    );
    assert_eq!(config["socialLinks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_conversion_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let page = write(dir.path(), "app/landing/page.js", LANDING_PAGE);

    convert_page(dir.path(), &page).unwrap();
    let once = fs::read(&page).unwrap();

    let report = convert_page(dir.path(), &page).unwrap();
    assert_eq!(report.skip_reason(), Some(SkipReason::AlreadyConverted));
    assert_eq!(fs::read(&page).unwrap(), once);
}

#[test]
fn test_batch_over_catalog() {
    let dir = TempDir::new().unwrap();
    let base = dir.path();
    write(base, "page.js", "const products = [{ id: 1 }];\n");
    write(base, "app/landing/page.js", LANDING_PAGE);
    write(
        base,
        "app/about/page.js",
        "const team = [{ name: 'Ada', role: 'Founder' }];\n",
    );
    write(
        base,
        "app/legacy/page.js",
        "const pageConfig = { title: 'Old' };\nconst team = [];\n",
    );
    write(
        base,
        "app/done/page.js",
        &format!("{}\nconst faqs = [];\n", MARKER),
    );
    write(base, "dist/app/page.js", "const posts = [];\n");

    let locator = PageLocator::new(base.to_path_buf())
        .unwrap()
        .with_config(LocatorConfig {
            sorted: true,
            ..Default::default()
        });
    let options = ConvertOptions::new(locator.root());
    let batch = BatchConverter::new(PageConverter::new(RealFileSystem, options));

    let report = batch.run(&locator);

    assert_eq!(report.summary.located, 5);
    assert_eq!(report.summary.converted, 2);
    assert_eq!(report.summary.skipped, 3);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.skipped_with(SkipReason::RootIndex), 1);
    assert_eq!(report.skipped_with(SkipReason::ExistingConfig), 1);
    assert_eq!(report.skipped_with(SkipReason::AlreadyConverted), 1);

    let about = fs::read_to_string(base.join("app/about/page.js")).unwrap();
    assert_eq!(
        config_of(&about)["team"],
        json!([{ "name": "Ada", "role": "Founder" }])
    );
    assert_eq!(
        fs::read_to_string(base.join("page.js")).unwrap(),
        "const products = [{ id: 1 }];\n"
    );
    assert_eq!(
        fs::read_to_string(base.join("dist/app/page.js")).unwrap(),
        "const posts = [];\n"
    );
}

#[test]
fn test_restricted_extractor_in_batch() {
    let dir = TempDir::new().unwrap();
    let page = write(dir.path(), "app/landing/page.js", LANDING_PAGE);

    let converter = PageConverter::new(RealFileSystem, ConvertOptions::new(dir.path()))
        .with_extractor(pagecfg::Extractor::with_names([RecognizedName::SocialLinks]));
    let report = converter.convert_page(&page).unwrap();

    assert_eq!(report.keys, vec!["colors", "socialLinks"]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_page_counted_as_failed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let base = dir.path();
    write(base, "app/a/page.js", "const posts = [];\n");
    let locked = write(base, "app/b/page.js", "const team = [];\n");
    write(base, "app/c/page.js", "const faqs = [];\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let readable = fs::read(&locked).is_ok();

    let locator = PageLocator::new(base.to_path_buf())
        .unwrap()
        .with_config(LocatorConfig {
            sorted: true,
            ..Default::default()
        });
    let batch = BatchConverter::new(PageConverter::new(
        RealFileSystem,
        ConvertOptions::new(locator.root()),
    ));
    let report = batch.run(&locator);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    if readable {
        assert_eq!(report.summary.converted, 3);
    } else {
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.converted, 2);
        assert_eq!(report.pages.len(), 2);
        assert!(report.failures[0].path.ends_with("app/b/page.js"));
    }
}
