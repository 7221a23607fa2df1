use crate::config::{SiteConfig, TypewriterTiming};
use crate::contact::{self, FormPayload, SubmissionStatus};
use crate::nav::{self, NavPanel};
use crate::progress;
use crate::reveal::{self, RevealSet};
use crate::scene::{self, CubePose, ElapsedClock};
use crate::three::{HeroScene, ThreeCapability};
use crate::typewriter::Typewriter;
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::future::TimeoutFuture;
use js_sys::Array;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Element, FormData, HtmlCanvasElement, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SubmitEvent,
};
use yew::prelude::*;

const SITE_CONFIG_ID: &str = "site-config";
const REVEAL_KEY_ATTRIBUTE: &str = "data-reveal-key";
const OWNER_NAME: &str = "Kyler Cao";

const NAV_LINKS: [(&str, &str); 5] = [
    ("#about", "About"),
    ("#projects", "Projects"),
    ("#skills", "Skills"),
    ("#contact", "Contact"),
    ("/resume.pdf", "Resume"),
];

fn document() -> Option<web_sys::Document> {
    window()?.document()
}

fn query_all(selector: &str) -> Vec<Element> {
    let Some(nodes) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Live IntersectionObserver; disconnects when dropped.
struct ViewportObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_viewport<F>(
    targets: &[Element],
    root_margin: &str,
    threshold: f64,
    mut on_entries: F,
) -> Option<ViewportObserver>
where
    F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_entries(entries, &observer);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    options.set_threshold(&JsValue::from_f64(threshold));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    for target in targets {
        observer.observe(target);
    }

    Some(ViewportObserver {
        observer,
        _callback: callback,
    })
}

#[hook]
fn use_section_tracker(active: UseStateSetter<Option<String>>) {
    use_effect_with((), move |_| {
        let sections = query_all("section[id]");
        let observer = observe_viewport(
            &sections,
            nav::SECTION_ROOT_MARGIN,
            nav::SECTION_THRESHOLD,
            move |entries, _observer| {
                let batch: Vec<(String, bool)> = entries
                    .iter()
                    .map(|entry| (entry.target().id(), entry.is_intersecting()))
                    .collect();

                let resolved = nav::resolve_active_section(
                    batch.iter().map(|(id, intersecting)| (id.as_str(), *intersecting)),
                );
                if let Some(id) = resolved {
                    log::debug!("active section changed id={id}");
                    active.set(Some(id.to_string()));
                }
            },
        );
        log::debug!("section observer attached sections={}", sections.len());

        move || drop(observer)
    });
}

#[hook]
fn use_reveal_on_scroll() {
    use_effect_with((), move |_| {
        let targets = query_all(reveal::REVEAL_SELECTOR);
        for (key, target) in targets.iter().enumerate() {
            let _ = target.set_attribute(REVEAL_KEY_ATTRIBUTE, &key.to_string());
        }

        let mut pending = RevealSet::new(0..targets.len());
        let observer = observe_viewport(
            &targets,
            reveal::REVEAL_ROOT_MARGIN,
            reveal::REVEAL_THRESHOLD,
            move |entries, observer| {
                for entry in entries {
                    let target = entry.target();
                    let Some(key) = target
                        .get_attribute(REVEAL_KEY_ATTRIBUTE)
                        .and_then(|value| value.parse::<usize>().ok())
                    else {
                        continue;
                    };

                    if pending.reveal(&key, entry.is_intersecting()) {
                        let _ = target.class_list().add_1(reveal::VISIBLE_CLASS);
                        observer.unobserve(&target);
                        log::debug!("revealed key={key} remaining={}", pending.remaining());
                    }
                }

                if pending.is_done() {
                    observer.disconnect();
                }
            },
        );

        move || drop(observer)
    });
}

fn scroll_to_section(id: &str) {
    let Some(target) = document().and_then(|d| d.get_element_by_id(id)) else {
        log::debug!("nav target missing id={id}");
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

#[derive(Properties, PartialEq)]
struct NavBarProps {
    active_section: Option<String>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    let panel = use_state(NavPanel::default);

    let on_toggle = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*panel).toggled();
            panel.set(next);
        })
    };

    let links = NAV_LINKS.iter().map(|&(href, label)| {
        let onclick = {
            let panel = panel.clone();
            Callback::from(move |event: MouseEvent| {
                let Some(id) = nav::in_page_anchor(href) else {
                    return;
                };
                event.prevent_default();
                scroll_to_section(id);
                panel.set(NavPanel::closed());
            })
        };
        let active = props
            .active_section
            .as_deref()
            .is_some_and(|section| nav::link_targets_section(href, section));

        html! {
            <li>
                <a class={classes!("nav-link", active.then_some("active"))} href={href} onclick={onclick}>
                    {label}
                </a>
            </li>
        }
    });

    html! {
        <header class="site-header">
            <nav class="nav" aria-label="Primary">
                <a class="brand" href="#hero">{OWNER_NAME}</a>
                <button
                    class="nav-toggle"
                    type="button"
                    aria-controls="primary-links"
                    aria-expanded={panel.aria_expanded()}
                    aria-label="Toggle navigation"
                    onclick={on_toggle}
                >
                    <span aria-hidden="true">{"☰"}</span>
                </button>
                <ul id="primary-links" class={classes!("nav-links", panel.is_open().then_some("open"))}>
                    { for links }
                </ul>
            </nav>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct TypingTextProps {
    phrases: Vec<String>,
    timing: TypewriterTiming,
}

async fn run_typewriter(mut writer: Typewriter, display: NodeRef, running: Rc<Cell<bool>>) {
    let mut delay_ms = writer.start_delay_ms();

    loop {
        TimeoutFuture::new(delay_ms).await;
        if !running.get() {
            break;
        }

        let Some(display) = display.cast::<HtmlElement>() else {
            log::debug!("typewriter stopped: display element missing");
            break;
        };

        let tick = writer.tick();
        if let Some(text) = tick.text.as_deref() {
            display.set_text_content(Some(text));
        }
        delay_ms = tick.next_delay_ms;
    }
}

#[function_component(TypingText)]
fn typing_text(props: &TypingTextProps) -> Html {
    let display = use_node_ref();

    {
        let display = display.clone();
        let phrases = props.phrases.clone();
        let timing = props.timing;
        use_effect_with((), move |_| {
            let running = Rc::new(Cell::new(true));
            if let Some(writer) = Typewriter::new(phrases, timing) {
                spawn_local(run_typewriter(writer, display, running.clone()));
            }
            move || running.set(false)
        });
    }

    html! {
        <span id="typing" class="typing" ref={display} aria-live="polite"></span>
    }
}

struct HeroFrameState {
    scene: HeroScene,
    profile: NodeRef,
    clock: RefCell<ElapsedClock>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// Running hero animation. Dropping it cancels the pending frame and the
/// resize listener.
struct HeroLoop {
    state: Rc<HeroFrameState>,
    _resize: EventListener,
}

impl Drop for HeroLoop {
    fn drop(&mut self) {
        self.state.frame.borrow_mut().take();
    }
}

fn draw_hero_frame(state: &HeroFrameState, now_ms: f64) {
    let elapsed = state.clock.borrow_mut().elapsed_secs(now_ms);

    if let Some(profile) = state.profile.cast::<HtmlElement>() {
        let _ = profile
            .style()
            .set_property("transform", &scene::profile_transform(elapsed));
    }
    state.scene.render(CubePose::at(elapsed));
}

fn schedule_hero_frame(state: Rc<HeroFrameState>) {
    let next = Rc::clone(&state);
    let handle = request_animation_frame(move |timestamp| {
        next.frame.borrow_mut().take();
        draw_hero_frame(&next, timestamp);
        schedule_hero_frame(next);
    });
    *state.frame.borrow_mut() = Some(handle);
}

fn start_hero_scene(canvas: &NodeRef, profile: NodeRef) -> Option<HeroLoop> {
    let canvas = canvas.cast::<HtmlCanvasElement>()?;
    let Some(three) = ThreeCapability::detect() else {
        log::info!("hero scene skipped: three.js not loaded");
        return None;
    };
    let win = window()?;

    let state = Rc::new(HeroFrameState {
        scene: three.build_scene(canvas)?,
        profile,
        clock: RefCell::new(ElapsedClock::default()),
        frame: RefCell::new(None),
    });

    let resize = {
        let state = Rc::clone(&state);
        EventListener::new(&win, "resize", move |_| state.scene.resize())
    };

    let now_ms = win.performance().map(|p| p.now()).unwrap_or(0.0);
    draw_hero_frame(&state, now_ms);
    schedule_hero_frame(Rc::clone(&state));
    log::info!("hero scene started");

    Some(HeroLoop {
        state,
        _resize: resize,
    })
}

#[function_component(HeroCanvas)]
fn hero_canvas() -> Html {
    let canvas = use_node_ref();
    let profile = use_node_ref();

    {
        let canvas = canvas.clone();
        let profile = profile.clone();
        use_effect_with((), move |_| {
            let hero_loop = start_hero_scene(&canvas, profile);
            move || drop(hero_loop)
        });
    }

    html! {
        <>
            <canvas id="hero-canvas" ref={canvas} aria-hidden="true"></canvas>
            <div class="profile-circle" ref={profile}>
                <img src="/profile.jpg" alt={format!("Portrait of {OWNER_NAME}")} loading="lazy" />
            </div>
        </>
    }
}

fn read_form_payload(form: &HtmlFormElement) -> FormPayload {
    let Ok(data) = FormData::new_with_form(form) else {
        return FormPayload::default();
    };

    FormPayload::from_entries(data.entries().into_iter().filter_map(|entry| {
        let pair: Array = entry.ok()?.dyn_into().ok()?;
        Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
    }))
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    submit_delay_ms: u32,
}

#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let form_ref = use_node_ref();
    let status = use_state(SubmissionStatus::default);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let status = status.clone();
        let delay_ms = props.submit_delay_ms;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };

            status.set(SubmissionStatus::Sending);
            let payload = read_form_payload(&form);
            if payload.is_empty() {
                log::debug!("contact form submitted without fields");
            }

            let status = status.clone();
            spawn_local(async move {
                let result = contact::deliver_demo(&payload, TimeoutFuture::new(delay_ms)).await;
                if let Err(err) = &result {
                    log::warn!("contact form delivery failed: {err}");
                }

                let outcome = SubmissionStatus::from_result(&result);
                if outcome.resets_form() {
                    form.reset();
                }
                status.set(outcome);
            });
        })
    };

    html! {
        <form id="contact-form" class="contact-form" ref={form_ref} onsubmit={onsubmit}>
            <label>
                <span>{"Name"}</span>
                <input name="name" type="text" autocomplete="name" required=true />
            </label>
            <label>
                <span>{"Email"}</span>
                <input name="email" type="email" autocomplete="email" required=true />
            </label>
            <label>
                <span>{"Message"}</span>
                <textarea name="message" rows="5" required=true />
            </label>
            <button type="submit" class={classes!("submit-btn", status.is_loading().then_some("loading"))}>
                {"Send message"}
            </button>
            <p class="form-status" role="status" aria-live="polite">{status.message()}</p>
        </form>
    }
}

fn update_progress(indicator: &NodeRef) {
    let Some(indicator) = indicator.cast::<HtmlElement>() else {
        return;
    };
    let Some(win) = window() else {
        return;
    };

    let scroll_top = win.scroll_y().unwrap_or(0.0);
    let document_height = win
        .document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    let viewport_height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);

    let fraction = progress::scroll_fraction(scroll_top, document_height, viewport_height);
    let _ = indicator
        .style()
        .set_property("transform", &progress::indicator_transform(fraction));
}

#[function_component(ScrollProgress)]
fn scroll_progress() -> Html {
    let indicator = use_node_ref();

    {
        let indicator = indicator.clone();
        use_effect_with((), move |_| {
            update_progress(&indicator);
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_| update_progress(&indicator))
            });
            move || drop(listener)
        });
    }

    html! {
        <div class="scroll-progress" ref={indicator} aria-hidden="true"></div>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let year = js_sys::Date::new_0().get_full_year();

    html! {
        <footer class="site-footer">
            <p>
                {"© "}<span id="year">{year}</span>{format!(" {OWNER_NAME}. Built with Rust and Yew.")}
            </p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let active_section = use_state(|| None::<String>);
    use_section_tracker(active_section.setter());
    use_reveal_on_scroll();

    html! {
        <>
            <ScrollProgress />
            <NavBar active_section={(*active_section).clone()} />

            <main id="content">
                <section id="hero" class="hero">
                    <div class="hero-copy fade-up">
                        <p class="eyebrow">{"Hi, I'm"}</p>
                        <h1>{OWNER_NAME}</h1>
                        <p class="hero-role">
                            <TypingText phrases={props.config.phrases.clone()} timing={props.config.typewriter} />
                            <span class="caret" aria-hidden="true">{"|"}</span>
                        </p>
                        <a class="cta" href="#contact">{"Get in touch"}</a>
                    </div>
                    <div class="hero-visual fade-in">
                        <HeroCanvas />
                    </div>
                </section>

                <section id="about" class="section-block">
                    <h2 class="fade-up">{"About"}</h2>
                    <p class="fade-up">
                        {"Computer Science student at Texas A&M building dependable software for campus operations and practical machine learning projects."}
                    </p>
                </section>

                <section id="projects" class="section-block">
                    <h2 class="fade-up">{"Projects"}</h2>
                    <ul class="project-grid">
                        <li class="project-card fade-up">
                            <h3>{"Project SHADE"}</h3>
                            <p class="muted">{"LSTM component for Austin heat-wave forecasting."}</p>
                        </li>
                        <li class="project-card fade-up">
                            <h3>{"FlightPath"}</h3>
                            <p class="muted">{"AI flight search experience from TAMUHack 2025."}</p>
                        </li>
                        <li class="project-card fade-up">
                            <h3>{"TechHub Delivery Platform"}</h3>
                            <p class="muted">{"Internal system handling 150+ monthly orders."}</p>
                        </li>
                    </ul>
                </section>

                <section id="skills" class="section-block">
                    <h2 class="fade-up">{"Skills"}</h2>
                    <ul class="inline-list fade-up">
                        <li><span class="muted">{"Primary"}</span>{"Rust, Java, Python, C++, TypeScript"}</li>
                        <li><span class="muted">{"Database"}</span>{"SQL (PostgreSQL, MySQL)"}</li>
                        <li><span class="muted">{"Also"}</span>{"C#, HTML, CSS"}</li>
                    </ul>
                </section>

                <section id="contact" class="section-block">
                    <h2 class="fade-up">{"Contact"}</h2>
                    <div class="fade-up">
                        <ContactForm submit_delay_ms={props.config.submit_delay_ms} />
                    </div>
                </section>
            </main>

            <Footer />
        </>
    }
}

fn read_site_config() -> (SiteConfig, Option<String>) {
    let source = document()
        .and_then(|d| d.get_element_by_id(SITE_CONFIG_ID))
        .and_then(|element| element.text_content())
        .unwrap_or_default();

    match SiteConfig::from_json(&source) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err.to_string())),
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let (config, config_error) = read_site_config();
    let _ = console_log::init_with_level(config.log_level);
    if let Some(err) = config_error {
        log::warn!("falling back to default site config: {err}");
    }
    log::info!("portfolio starting phrases={}", config.phrases.len());

    yew::Renderer::<App>::with_root_and_props(
        document()
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
