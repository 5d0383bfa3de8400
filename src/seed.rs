//! Built-in starter feed, shown until a cached feed is hydrated over it.

use crate::post::Post;

pub fn default_posts() -> Vec<Post> {
    vec![
        Post::new(1, "Alice", "Just joined Aqualink! Excited to connect with everyone.")
            .with_likes(2)
            .with_comments(["Welcome Alice!"]),
        Post::new(2, "Bob", "What a beautiful day to share some photos!")
            .with_likes(5)
            .with_comments(["Nice!", "Show us more!"]),
        Post::new(3, "Carol", "Loving the new features on Aqualink!")
            .with_likes(3)
            .with_comments(["Me too!"]),
        Post::new(4, "Dave", "Anyone up for a meetup this weekend?")
            .with_likes(1)
            .with_comments(["I am!"]),
        Post::new(5, "Eve", "Check out my latest blog post!")
            .with_likes(4)
            .with_comments(["Great read!"]),
        Post::new(6, "Frank", "Just finished a marathon!")
            .with_likes(6)
            .with_comments(["Congrats!"]),
        Post::new(7, "Grace", "Aqualink is the best!")
            .with_likes(7)
            .with_comments(["Absolutely!"]),
        Post::new(8, "Henry", "Looking for book recommendations.")
            .with_likes(2)
            .with_comments(["Try \"1984\"!"]),
        Post::new(9, "Ivy", "Just adopted a puppy!")
            .with_likes(8)
            .with_comments(["So cute!"]),
        Post::new(10, "Jack", "Who wants to play chess?")
            .with_likes(3)
            .with_comments(["I do!"]),
        Post::new(11, "Kate", "Started a new job today!")
            .with_likes(5)
            .with_comments(["Congrats!"]),
        Post::new(12, "Alice", "Enjoying a sunny day at the park.")
            .with_likes(2)
            .with_comments(["Nice!"]),
    ]
}
