use crate::error::Result;
use std::future::Future;

/// One page of a multi-page listing. `next` carries the token for the
/// following request, or `None` once the endpoint reports the end of the
/// sequence. Each endpoint adapter translates its own termination
/// convention (cursor + `has_more`, or page/pages counters) into `next`.
#[derive(Debug, Clone)]
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next: Option<C>,
}

/// Follows `next` tokens starting from `start` and concatenates every
/// page's items in server-delivered order. An error on any page call
/// aborts the whole drain with no partial result.
pub async fn drain_pages<T, C, F, Fut>(start: C, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Page<T, C>>>,
{
    let mut all_items = Vec::new();
    let mut token = start;

    loop {
        let page = fetch_page(token).await?;
        all_items.extend(page.items);

        match page.next {
            Some(next) => token = next,
            None => return Ok(all_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn numbered_pages(sizes: &[usize]) -> Vec<Page<usize, usize>> {
        let mut pages = Vec::new();
        let mut next_item = 0;

        for (index, size) in sizes.iter().enumerate() {
            let items = (next_item..next_item + size).collect::<Vec<_>>();
            next_item += size;

            pages.push(Page {
                items,
                next: (index + 1 < sizes.len()).then_some(index + 1),
            });
        }

        pages
    }

    #[tokio::test]
    async fn concatenates_pages_in_server_order() {
        let pages = numbered_pages(&[500, 500, 12]);

        let drained = drain_pages(0usize, |index| {
            let page = pages[index].clone();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(drained.len(), 1012);
        assert!(drained.iter().enumerate().all(|(index, item)| *item == index));
    }

    #[tokio::test]
    async fn single_page_without_next_token_drains_once() {
        let mut calls = 0;

        let drained = drain_pages(0usize, |_| {
            calls += 1;
            async move {
                Ok(Page {
                    items: vec!["only"],
                    next: None,
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(drained, vec!["only"]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn page_error_aborts_without_partial_result() {
        let pages = numbered_pages(&[3, 3, 3]);

        let result = drain_pages(0usize, |index| {
            let page = pages[index].clone();
            async move {
                if index == 1 {
                    return Err(Error::Api("internal_error".to_string()));
                }
                Ok(page)
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Api(_))));
    }
}
