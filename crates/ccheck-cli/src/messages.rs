//! Fixed texts the bot posts.

/// Posted once a pull request is merged.
pub const MSG_MERGED: &str = "Well done! 🎉

Your pull request has been successfully merged.

We appreciate your hard work and valuable input. If you have any further questions or need additional changes, feel free to reach out.

Happy coding!";

/// Greeting posted when a pull request is opened.
pub const MSG_HEADER: &str = "Thanks for your contribution! 🎉
Please be patient while we finish checking. If you've added or modified challenges, a brief report will be generated below.
Have a nice day!";

/// Appended to the greeting when the pull request adds an entry.
pub const MSG_CHECKLIST: &str = "

```markdown
# Pre-merge checklist (for maintainers)
- The challenge is suitable for the catalogue;
- The submitter has the right to submit it;
- The submitted information is complete and valid;
- The challenge is filed under the right category, and its name, introduction and notes meet the guidelines.
```
";
