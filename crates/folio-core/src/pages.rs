//! HTML pages: landing page, project cards, project detail and not-found.
//! Plain string building; every dynamic value goes through `html_escape`.

use crate::portfolio::SiteProfile;
use crate::project::ProjectRecord;

const EXTERNAL: &str = r#"target="_blank" rel="noopener noreferrer""#;
const PRIMARY_BUTTON: &str = "inline-flex h-10 items-center justify-center rounded-md bg-primary px-8 text-sm font-medium text-primary-foreground shadow";
const OUTLINE_BUTTON: &str = "inline-flex h-10 items-center justify-center rounded-md border border-input bg-background px-8 text-sm font-medium shadow-sm";

/// Escapes text for element bodies and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(profile: &SiteProfile, title: &str, main: &str, year: i32) -> String {
    let name = html_escape(&profile.display_name);
    let github = html_escape(&profile.github_url);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="flex flex-col min-h-screen">
<header class="sticky top-0 z-10 border-b">
  <div class="container flex items-center justify-between h-16 px-4">
    <a href="/" class="text-lg font-semibold">{name}</a>
    <nav class="hidden md:flex gap-6">
      <a href="/#about" class="text-sm font-medium">About</a>
      <a href="/#projects" class="text-sm font-medium">Projects</a>
      <a href="/#contact" class="text-sm font-medium">Contact</a>
    </nav>
    <a href="{github}" {EXTERNAL}>GitHub</a>
  </div>
</header>
<main class="flex-1">
{main}
</main>
<footer class="w-full border-t py-6">
  <div class="container flex items-center justify-between px-4">
    <p class="text-sm text-muted-foreground">&copy; {year} {name}. All rights reserved.</p>
    <a href="{github}" {EXTERNAL}>GitHub</a>
  </div>
</footer>
</body>
</html>
"##,
        title = html_escape(title),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| {
            format!(
                r#"<li class="flex items-center gap-2"><span class="h-2 w-2 rounded-full bg-primary"></span><span>{}</span></li>"#,
                html_escape(i)
            )
        })
        .collect()
}

/// Summary card for the projects grid.
pub fn project_card(repo: &ProjectRecord) -> String {
    let title = html_escape(repo.display_title());
    let image = match &repo.image {
        Some(src) => format!(
            r#"<div class="relative w-full h-48 overflow-hidden"><img src="{}" alt="{}" class="object-cover w-full h-full"></div>"#,
            html_escape(src),
            title
        ),
        None => String::new(),
    };
    let description = html_escape(repo.description.as_deref().unwrap_or("No description provided"));
    let mut badges: String = repo
        .summary_topics()
        .iter()
        .map(|t| format!(r#"<span class="badge badge-secondary">{}</span>"#, html_escape(t)))
        .collect();
    if let Some(lang) = &repo.language {
        badges.push_str(&format!(
            r#"<span class="badge badge-outline">{}</span>"#,
            html_escape(lang)
        ));
    }

    format!(
        r#"<div class="card flex flex-col overflow-hidden h-full">
  {image}
  <div class="card-header pb-2">
    <a href="{link}" {EXTERNAL} class="text-xl font-medium hover:underline text-primary">{title}</a>
    <p class="line-clamp-2 h-10">{description}</p>
  </div>
  <div class="card-content flex-1">
    <div class="flex flex-wrap gap-2 mb-4">{badges}</div>
    <div class="flex items-center gap-4 text-sm text-muted-foreground">
      <span class="stars">&#9733; {stars}</span>
      <span class="forks">&#8625; {forks}</span>
    </div>
  </div>
  <div class="card-footer pt-2 flex gap-2">
    <a href="{source}" {EXTERNAL} class="{PRIMARY_BUTTON} flex-1">View Code</a>
    <a href="{detail}" class="{OUTLINE_BUTTON}">Details</a>
  </div>
</div>"#,
        link = html_escape(repo.primary_link()),
        stars = repo.stars,
        forks = repo.forks,
        source = html_escape(&repo.html_url),
        detail = html_escape(&repo.detail_path()),
    )
}

/// Landing page: hero, about, featured projects, contact.
pub fn render_home(profile: &SiteProfile, projects: &[ProjectRecord], year: i32) -> String {
    let greeting = html_escape(profile.greeting.as_deref().unwrap_or("Hi there"));
    let avatar = match &profile.avatar {
        Some(src) => format!(
            r#"<div class="relative h-[300px] w-[300px] overflow-hidden rounded-full border-4"><img src="{}" alt="Profile" class="object-cover w-full h-full"></div>"#,
            html_escape(src)
        ),
        None => String::new(),
    };
    let cards: String = projects.iter().map(project_card).collect();
    let email = match &profile.email {
        Some(addr) => format!(
            r#"<div class="card p-6 text-center"><h3 class="text-xl font-bold">Email</h3><p class="text-muted-foreground">Send me an email to discuss opportunities</p><a href="mailto:{addr}" class="{OUTLINE_BUTTON}">Send Email</a></div>"#,
            addr = html_escape(addr)
        ),
        None => String::new(),
    };

    let main = format!(
        r##"<section class="w-full py-12 md:py-24 bg-muted/40">
  <div class="container px-4 grid gap-6 lg:grid-cols-[1fr_400px]">
    <div class="flex flex-col justify-center space-y-4">
      <h1 class="text-3xl font-bold tracking-tighter sm:text-5xl">{greeting}</h1>
      <p class="max-w-[600px] text-muted-foreground md:text-xl">{tagline}</p>
      <div class="flex flex-col gap-2 min-[400px]:flex-row">
        <a href="#projects" class="{PRIMARY_BUTTON}">View My Projects</a>
        <a href="#contact" class="{OUTLINE_BUTTON}">Contact Me</a>
      </div>
    </div>
    <div class="flex items-center justify-center">{avatar}</div>
  </div>
</section>
<section id="about" class="w-full py-12 md:py-24">
  <div class="container px-4">
    <div class="flex flex-col items-center text-center space-y-2">
      <h2 class="text-3xl font-bold tracking-tighter sm:text-5xl">About Me</h2>
      <p class="max-w-[900px] text-muted-foreground md:text-xl">{about}</p>
    </div>
    <div class="mx-auto grid max-w-5xl grid-cols-1 gap-6 py-12 md:grid-cols-2">
      <div><h3 class="text-xl font-bold">Skills</h3><ul class="grid grid-cols-2 gap-2 text-muted-foreground">{skills}</ul></div>
      <div><h3 class="text-xl font-bold">Interests</h3><ul class="grid grid-cols-2 gap-2 text-muted-foreground">{interests}</ul></div>
    </div>
  </div>
</section>
<section id="projects" class="w-full py-12 md:py-24 bg-muted/40">
  <div class="container px-4">
    <div class="flex flex-col items-center text-center space-y-2">
      <h2 class="text-3xl font-bold tracking-tighter sm:text-5xl">Featured Projects</h2>
      <p class="max-w-[900px] text-muted-foreground md:text-xl">Here are some of my highlighted projects. Each one showcases different skills and interests.</p>
    </div>
    <div class="mx-auto grid max-w-5xl grid-cols-1 gap-6 py-12 md:grid-cols-2 lg:grid-cols-3">{cards}</div>
  </div>
</section>
<section id="contact" class="w-full py-12 md:py-24">
  <div class="container px-4">
    <div class="flex flex-col items-center text-center space-y-2">
      <h2 class="text-3xl font-bold tracking-tighter sm:text-5xl">Get in Touch</h2>
      <p class="max-w-[900px] text-muted-foreground md:text-xl">Feel free to reach out to me through any of the following channels.</p>
    </div>
    <div class="mx-auto grid max-w-3xl grid-cols-1 gap-6 py-12 md:grid-cols-2">
      <div class="card p-6 text-center"><h3 class="text-xl font-bold">GitHub</h3><p class="text-muted-foreground">Check out my code and contributions</p><a href="{github}" {EXTERNAL} class="{OUTLINE_BUTTON}">Visit GitHub</a></div>
      {email}
    </div>
  </div>
</section>"##,
        tagline = html_escape(&profile.tagline),
        about = html_escape(&profile.about),
        skills = bullet_list(&profile.skills),
        interests = bullet_list(&profile.interests),
        github = html_escape(&profile.github_url),
    );

    layout(profile, &profile.display_name, &main, year)
}

/// Detail page for one project.
pub fn render_project(profile: &SiteProfile, repo: &ProjectRecord, year: i32) -> String {
    let title = html_escape(repo.display_title());
    let image = match &repo.image {
        Some(src) => format!(
            r#"<div class="relative w-full h-[300px] md:h-[400px] mb-8 overflow-hidden rounded-lg border"><img src="{}" alt="{}" class="object-cover w-full h-full"></div>"#,
            html_escape(src),
            title
        ),
        None => String::new(),
    };
    let detailed = match &repo.detailed_description {
        Some(d) => format!(r#"<p class="text-muted-foreground">{}</p>"#, html_escape(d)),
        None => String::new(),
    };
    let features = if repo.features.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="features"><h2 class="text-2xl font-bold mb-4">Features</h2><ul class="space-y-2">{}</ul></div>"#,
            bullet_list(&repo.features)
        )
    };
    let language = match &repo.language {
        Some(lang) => format!(
            r#"<div class="flex justify-between"><span class="text-muted-foreground">Primary Language</span><span class="font-medium">{}</span></div>"#,
            html_escape(lang)
        ),
        None => String::new(),
    };
    let topics: String = repo
        .topics
        .iter()
        .map(|t| {
            format!(
                r#"<span class="inline-flex items-center rounded-full bg-primary/10 px-3 py-1 text-sm font-medium text-primary">{}</span>"#,
                html_escape(t)
            )
        })
        .collect();
    let live = match &repo.homepage {
        Some(url) => format!(
            r#"<a href="{}" {EXTERNAL} class="{OUTLINE_BUTTON} w-full">View Page</a>"#,
            html_escape(url)
        ),
        None => String::new(),
    };

    let main = format!(
        r#"<div class="container px-4 py-12">
  <a href="/#projects" class="inline-flex items-center text-sm font-medium mb-8">&larr; Back to Projects</a>
  <div class="grid gap-12 md:grid-cols-[2fr_1fr]">
    <div>
      <h1 class="text-3xl font-bold tracking-tighter sm:text-4xl md:text-5xl mb-6">{title}</h1>
      {image}
      <div class="space-y-6">
        <h2 class="text-2xl font-bold mb-4">About this project</h2>
        <p class="text-muted-foreground">{description}</p>
        {detailed}
      </div>
      {features}
    </div>
    <div class="space-y-8">
      <div class="rounded-lg border p-6">
        <h3 class="text-xl font-bold mb-4">Project Details</h3>
        <div class="flex justify-between"><span class="text-muted-foreground">Repository</span><a href="{source}" {EXTERNAL} class="font-medium hover:underline text-primary">View on GitHub</a></div>
        <div class="flex justify-between"><span class="text-muted-foreground">Last Updated</span><span class="font-medium">{updated}</span></div>
        <div class="flex justify-between"><span class="text-muted-foreground">Stars</span><span class="font-medium stars">{stars}</span></div>
        <div class="flex justify-between"><span class="text-muted-foreground">Forks</span><span class="font-medium forks">{forks}</span></div>
        {language}
      </div>
      <div class="rounded-lg border p-6">
        <h3 class="text-xl font-bold mb-4">Technologies</h3>
        <div class="flex flex-wrap gap-2">{topics}</div>
      </div>
      <div class="flex flex-col gap-4">
        <a href="{source}" {EXTERNAL} class="{PRIMARY_BUTTON} w-full">View Source Code</a>
        {live}
      </div>
    </div>
  </div>
</div>"#,
        description = html_escape(repo.description.as_deref().unwrap_or("No description provided")),
        source = html_escape(&repo.html_url),
        updated = repo.updated_at.format("%B %-d, %Y"),
        stars = repo.stars,
        forks = repo.forks,
    );

    layout(profile, repo.display_title(), &main, year)
}

/// Body for a detail request whose name matches no showcased project.
pub fn render_not_found(profile: &SiteProfile, name: &str, year: i32) -> String {
    let main = format!(
        r#"<div class="container px-4 py-24 text-center">
  <h1 class="text-3xl font-bold mb-4">Project not found</h1>
  <p class="text-muted-foreground mb-8">There is no project named <code>{}</code>.</p>
  <a href="/#projects" class="{OUTLINE_BUTTON}">Back to Projects</a>
</div>"#,
        html_escape(name)
    );
    layout(profile, "Project not found", &main, year)
}
