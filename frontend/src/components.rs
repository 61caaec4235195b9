use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpExpenseApi;
use crate::client::ExpenseClient;
use crate::model::ExpenseForm;
use crate::query::CategoryFilter;
use crate::settings::ClientConfig;
use crate::view::{CategoryOptions, ExpenseRow, ExpenseView, ALL_CATEGORIES_LABEL};

#[derive(Clone)]
struct PageView {
    rows: UseStateHandle<Vec<ExpenseRow>>,
    total: UseStateHandle<String>,
    options: UseStateHandle<CategoryOptions>,
    form: UseStateHandle<ExpenseForm>,
    filter: UseStateHandle<CategoryFilter>,
}

impl ExpenseView for PageView {
    fn render_rows(&self, rows: Vec<ExpenseRow>) {
        self.rows.set(rows);
    }

    fn render_total(&self, total: String) {
        self.total.set(total);
    }

    fn render_category_options(&self, options: CategoryOptions) {
        self.options.set(options);
    }

    fn reset_filter(&self) {
        self.filter.set(CategoryFilter::all());
    }

    fn reset_form(&self) {
        self.form.set(ExpenseForm::default());
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen bg-background">
            <ExpensePage />
        </div>
    }
}

#[function_component(ExpensePage)]
fn expense_page() -> Html {
    let client = use_memo(
        |_| {
            let config = ClientConfig::load();
            ExpenseClient::new(HttpExpenseApi::new(config.api_url), config.currency_symbol)
        },
        (),
    );

    let view = PageView {
        rows: use_state(Vec::<ExpenseRow>::new),
        total: use_state(String::new),
        options: use_state(CategoryOptions::default),
        form: use_state(ExpenseForm::default),
        filter: use_state(CategoryFilter::all),
    };
    let select_ref = use_node_ref();

    // Keep the select's value in step with `options.selected`.
    {
        let select_ref = select_ref.clone();
        use_effect_with_deps(
            move |options: &CategoryOptions| {
                if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                    select.set_value(options.selected.select_value());
                }
                || ()
            },
            (*view.options).clone(),
        );
    }

    {
        let client = client.clone();
        let view = view.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    client.refresh(&CategoryFilter::all(), &view).await;
                });
                || ()
            },
            (),
        );
    }

    let on_filter_change = {
        let client = client.clone();
        let view = view.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let next = CategoryFilter::from_select_value(&select.value());
            view.filter.set(next.clone());

            let client = client.clone();
            let view = view.clone();
            spawn_local(async move {
                client.refresh(&next, &view).await;
            });
        })
    };

    let on_sort = {
        let client = client.clone();
        let view = view.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let current = (*view.filter).clone();
            let client = client.clone();
            let view = view.clone();
            spawn_local(async move {
                client.refresh(&current, &view).await;
            });
        })
    };

    let on_submit = {
        let client = client.clone();
        let view = view.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submitted = (*view.form).clone();
            let current = (*view.filter).clone();
            let client = client.clone();
            let view = view.clone();
            spawn_local(async move {
                client.submit(&submitted, &current, &view).await;
            });
        })
    };

    let form = &*view.form;
    let options = &*view.options;

    html! {
        { page_shell(
            "Expense Tracker",
            html! {
                <button id="sort-date" type="button" onclick={on_sort} class="bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-xl font-bold text-sm">
                    {"Sort by date"}
                </button>
            },
            html! {
                <>
                    <div class="grid grid-cols-1 lg:grid-cols-12 gap-6 items-stretch">
                        <div class="lg:col-span-4 bg-white p-5 rounded-[10px] shadow-sm border border-white/50 flex flex-col justify-center">
                            <span class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{"Total Expenses"}</span>
                            <h3 id="total" class="text-2xl font-bold text-[#1D617A] tracking-tight">{ (*view.total).clone() }</h3>
                        </div>

                        <form id="expense-form" name="expense-form" onsubmit={on_submit} class="lg:col-span-8 bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
                            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Add New Expense"}</h4>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Date"}</label>
                                    <input type="date" name="date" value={form.date.clone()} oninput={field_input(&view.form, |f, v| f.date = v)} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                                    <input type="text" name="category" placeholder="Category" value={form.category.clone()} oninput={field_input(&view.form, |f, v| f.category = v)} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Description"}</label>
                                    <input type="text" name="description" placeholder="Expense description" value={form.description.clone()} oninput={field_input(&view.form, |f, v| f.description = v)} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Amount"}</label>
                                    <input type="number" step="0.01" name="amount" placeholder="0.00" value={form.amount.clone()} oninput={field_input(&view.form, |f, v| f.amount = v)} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                </div>
                            </div>
                            <button type="submit" class="w-full bg-[#173E63] text-white py-2 rounded-[10px] text-[10px] font-bold">{"Add Expense"}</button>
                        </form>
                    </div>

                    <div class="bg-card rounded-2xl shadow-md border border-border overflow-hidden">
                        <div class="p-5 border-b border-border flex items-center justify-between">
                            <h3 class="font-bold text-lg text-foreground">{"Expenses History"}</h3>
                            <select id="category-filter" ref={select_ref} onchange={on_filter_change} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63]">
                                <option value="">{ ALL_CATEGORIES_LABEL }</option>
                                { for options.categories.iter().map(|category| html! {
                                    <option value={category.clone()}>{ category.clone() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody id="expense-table" class="divide-y divide-border">
                                    { for view.rows.iter().enumerate().map(|(idx, row)| html! {
                                        <tr key={idx} class="text-sm hover:bg-muted/40 transition-colors">
                                            <td class="px-8 py-4 text-muted-foreground">{ row.date.clone() }</td>
                                            <td class="px-8 py-4">
                                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ row.category.clone() }</span>
                                            </td>
                                            <td class="px-8 py-4 text-foreground">{ row.description.clone() }</td>
                                            <td class="px-8 py-4 font-semibold text-foreground">{ row.amount.clone() }</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

fn field_input(
    form: &UseStateHandle<ExpenseForm>,
    apply: fn(&mut ExpenseForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}
