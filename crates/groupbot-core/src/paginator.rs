//! Fixed-size paging over an ordered snapshot.

use crate::context::CommandContext;
use crate::error::DomainError;
use crate::reply::Embed;

/// Slices `items` into pages of `page_size`. A page size of zero is treated as one.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn pages(&self) -> std::slice::Chunks<'a, T> {
        self.items.chunks(self.page_size)
    }

    /// Renders one embed per page. The title gets a `[n/m]` marker when
    /// there is more than one page.
    pub fn render<F>(&self, title: &str, mut render_page: F) -> Vec<Embed>
    where
        F: FnMut(Embed, &[T]) -> Embed,
    {
        let page_count = self.page_count();
        self.pages()
            .enumerate()
            .map(|(index, page)| {
                let title = if page_count > 1 {
                    format!("[{}/{}] {}", index + 1, page_count, title)
                } else {
                    title.to_string()
                };
                render_page(Embed::new().title(title), page)
            })
            .collect()
    }
}

/// Renders `items` into pages and hands them to the dispatcher. Sends nothing
/// when `items` is empty; callers reply with their own empty-state text.
pub async fn paginate<T, F>(
    ctx: &mut dyn CommandContext,
    items: &[T],
    page_size: usize,
    title: &str,
    render_page: F,
) -> Result<usize, DomainError>
where
    F: FnMut(Embed, &[T]) -> Embed,
{
    let pages = Paginator::new(items, page_size).render(title, render_page);
    let sent = pages.len();
    if sent > 0 {
        ctx.reply_pages(pages).await?;
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thirty_items_make_two_pages() {
        let items: Vec<u32> = (0..30).collect();
        let paginator = Paginator::new(&items, 25);
        assert_eq!(paginator.page_count(), 2);
        let sizes: Vec<usize> = paginator.pages().map(<[u32]>::len).collect();
        assert_eq!(sizes, vec![25, 5]);
        assert_eq!(paginator.pages().nth(1).unwrap()[0], 25);
    }

    #[test]
    fn test_empty_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let paginator = Paginator::new(&items, 25);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.pages().next().is_none());
        assert!(paginator.render("Title", |embed, _| embed).is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (0..50).collect();
        assert_eq!(Paginator::new(&items, 25).page_count(), 2);
    }

    #[test]
    fn test_render_titles() {
        let items: Vec<u32> = (0..3).collect();
        let single = Paginator::new(&items, 25).render("Groups", |embed, page| {
            embed.description(format!("{} items", page.len()))
        });
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].title.as_deref(), Some("Groups"));
        assert_eq!(single[0].description.as_deref(), Some("3 items"));

        let paged = Paginator::new(&items, 2).render("Groups", |embed, _| embed);
        assert_eq!(paged[0].title.as_deref(), Some("[1/2] Groups"));
        assert_eq!(paged[1].title.as_deref(), Some("[2/2] Groups"));
    }

    proptest! {
        #[test]
        fn prop_pages_partition_items(total in 0usize..200, page_size in 1usize..40) {
            let items: Vec<usize> = (0..total).collect();
            let paginator = Paginator::new(&items, page_size);
            let pages: Vec<&[usize]> = paginator.pages().collect();

            prop_assert_eq!(pages.len(), (total + page_size - 1) / page_size);
            prop_assert!(pages.iter().all(|p| !p.is_empty() && p.len() <= page_size));
            if let Some(last) = pages.last() {
                let expected = if total % page_size == 0 { page_size } else { total % page_size };
                prop_assert_eq!(last.len(), expected);
            }
            let flattened: Vec<usize> = pages.concat();
            prop_assert_eq!(flattened, items);
        }
    }
}
